mod annotate;
mod groups;
mod publish;

pub use annotate::{handle_annotate, AnnotateArgs};
pub use groups::{handle_groups, GroupsSubcommand};
pub use publish::{handle_publish, PublishSubcommand};
