pub mod provider_client;
pub mod webhook_signature;
