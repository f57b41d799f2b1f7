pub mod frame_sink;
pub mod gst_engine;
pub mod media_engine;

#[cfg(test)]
pub mod fake_engine;
