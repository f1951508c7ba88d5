//! Student pages: own record, parents and each parent's face images.

mod overview;
pub use overview::Overview;

mod parents;
pub use parents::Parents;

mod parent_edit;
pub use parent_edit::ParentEdit;
