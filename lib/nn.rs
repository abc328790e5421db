mod activation;
mod batchnorm;
mod bidirectional;
mod combine;
mod ensemble;
mod feedforward;
mod layer;
mod lstm;
mod multitask;
mod network;
mod prediction;
mod recurrent;

pub use activation::*;
pub use batchnorm::*;
pub use bidirectional::*;
pub use combine::*;
pub use ensemble::*;
pub use feedforward::*;
pub use layer::*;
pub use lstm::*;
pub use multitask::*;
pub use network::*;
pub use prediction::*;
pub use recurrent::*;
