pub mod anchors;
pub mod cache;
pub mod feed;
pub mod inspect;
pub mod layout;
pub mod synth;
pub mod tokens;
