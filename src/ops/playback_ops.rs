/// Clamps a slider or keyboard volume to a percentage.
pub fn clamp_volume(volume: i32) -> u8 {
    volume.clamp(0, 100) as u8
}

/// Converts a time slider position (0..=100) into an absolute seek target.
///
/// Returns `None` when the length is unknown or zero; there is nothing to seek in.
pub fn seek_target_ms(percent: f64, length_ms: Option<u64>) -> Option<u64> {
    let length_ms = length_ms.filter(|&l| l > 0)?;
    let percent = if percent.is_nan() {
        0.0
    } else {
        percent.clamp(0.0, 100.0)
    };
    Some((percent * length_ms as f64 / 100.0).round() as u64)
}

/// Inverse of `seek_target_ms`, for keeping the time slider in step with playback.
pub fn progress_percent(position_ms: u64, length_ms: u64) -> Option<f64> {
    if length_ms == 0 {
        return None;
    }
    Some((position_ms as f64 * 100.0 / length_ms as f64).clamp(0.0, 100.0))
}

/// `m:ss`, or `h:mm:ss` past the hour.
pub fn format_timestamp(ms: u64) -> String {
    let total_secs = ms / 1000;
    let (hours, minutes, seconds) = (total_secs / 3600, (total_secs / 60) % 60, total_secs % 60);
    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}
