pub mod content_length;
