use super::description::NetworkDescription;
use crate::common::ApplicationResult;

/// Port the application uses to obtain network descriptions.
/// Adapters decide where descriptions live and how they are encoded.
pub trait NetworkSource: Send + Sync {
    fn load_description(&self, name: &str) -> ApplicationResult<NetworkDescription>;
}
