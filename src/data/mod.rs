//! Dataset bytes and their presentation.
//!
//! A dataset is read once into a [`ByteBuffer`], split into 2-D pages by a
//! [`Pager`] and decoded cell by cell according to its [`ElementType`].

mod attributes;
mod buffer;
pub mod decoder;
mod element;
mod pager;
mod view;

pub use attributes::{read_attributes, render_attribute, AttributeRow};
pub use buffer::ByteBuffer;
pub use decoder::{decode_cell, Cell};
pub use element::{CompoundMember, ElementType};
pub use pager::{unravel_index, Pager};
pub use view::{type_label, CellFailure, DatasetView, RenderedPage};
