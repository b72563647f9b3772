mod access;
mod view;

pub use access::AccessError;
pub use view::ViewError;
