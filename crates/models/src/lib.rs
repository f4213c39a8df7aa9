//! Value types for the resources shared on a shelf.
//!
//! Everything in here is a plain, owned value. Resources refer to their tags
//! and categories by lightweight references (id + name); there are no
//! back-pointers from a tag to the resources carrying it. Reverse lookups are
//! derived indexes built by whoever owns the snapshot.

mod category;
mod id;
mod resource;
mod tag;

pub use self::category::CategoryRef;
pub use self::id::ResourceId;
pub use self::resource::ResourceRecord;
pub use self::tag::TagRef;
