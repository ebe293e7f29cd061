/// Display target that receives every freshly composed screen text.
pub trait RenderPort: Send {
    fn publish(&mut self, render: &str);
}
