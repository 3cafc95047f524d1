// Interactive flows driven by gateway events
pub mod feedback;
