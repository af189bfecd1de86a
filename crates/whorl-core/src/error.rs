use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MenuError {
    /// A ring layout over zero items has no defined angular step.
    #[error("radial layout requires at least one item")]
    InvalidGeometry,
    /// Item names are the identity key for lifecycle and hit-region
    /// bookkeeping and must be unique within a catalog.
    #[error("duplicate menu item name '{0}'")]
    DuplicateItemKey(String),
}
