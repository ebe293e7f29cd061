pub mod layout_adapter_factory;
pub mod voice_adapter_factory;
