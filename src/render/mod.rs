pub mod raster;
pub mod sequencer;
