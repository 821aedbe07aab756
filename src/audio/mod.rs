pub mod analysis;
pub mod decode;
pub mod features;
pub mod fft;
pub mod loudness;
pub mod source;
pub mod spectral;
pub mod timbre;
pub mod transcode;
pub mod window;
