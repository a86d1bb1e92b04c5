//! Graph rendering port.

use crate::domain::GraphScene;
use crate::error::GraphError;

/// Turns a laid-out graph into a document.
pub trait GraphRenderer: Send + Sync {
    /// File extension for rendered documents, without the dot.
    fn extension(&self) -> &'static str;

    /// Render the scene.
    fn render(&self, scene: &GraphScene) -> Result<String, GraphError>;
}
