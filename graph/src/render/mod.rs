pub mod text;

pub use text::{GraphRenderer, TextMeasure};
