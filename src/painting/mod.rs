mod buffer;
mod render;
mod utils;
mod writer;

pub(crate) use buffer::Buffer;
pub(crate) use render::{
    render, render_editor, ListingRenderer, ListingWithScrollBarRenderer, NavRenderer,
};
pub(crate) use utils::{force_width, scroll_window, str_width};
pub(crate) use writer::Writer;
