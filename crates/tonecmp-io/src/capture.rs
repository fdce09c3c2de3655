//! Input-device enumeration and blocking capture via cpal.

use crate::{Error, Result};
use cpal::Device;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Extract device name via `description()` (cpal 0.17+).
fn device_name(device: &Device) -> std::result::Result<String, cpal::DeviceNameError> {
    device.description().map(|d| d.name().to_string())
}

/// Input device information.
#[derive(Debug, Clone)]
pub struct AudioDevice {
    /// Human-readable device name.
    pub name: String,
    /// Default sample rate in Hz.
    pub default_sample_rate: u32,
}

/// List all input-capable audio devices.
pub fn list_input_devices() -> Result<Vec<AudioDevice>> {
    let host = cpal::default_host();
    let mut devices = Vec::new();

    if let Ok(inputs) = host.input_devices() {
        for device in inputs {
            if let Ok(name) = device_name(&device) {
                let sample_rate = device
                    .default_input_config()
                    .map(|c| c.sample_rate())
                    .unwrap_or(48000);

                devices.push(AudioDevice {
                    name,
                    default_sample_rate: sample_rate,
                });
            }
        }
    }

    Ok(devices)
}

/// Find an input device by list index or name substring, or take the
/// default when no selector is given.
fn find_input_device(host: &cpal::Host, selector: Option<&str>) -> Result<Device> {
    match selector {
        Some(search) => {
            let devices: Vec<Device> = host
                .input_devices()
                .map_err(|e| Error::Stream(e.to_string()))?
                .collect();

            if let Ok(index) = search.parse::<usize>() {
                return devices.into_iter().nth(index).ok_or_else(|| {
                    Error::DeviceNotFound(format!("no input device at index {index}"))
                });
            }

            let search_lower = search.to_lowercase();
            for device in devices {
                if let Ok(name) = device_name(&device)
                    && name.to_lowercase().contains(&search_lower)
                {
                    return Ok(device);
                }
            }
            Err(Error::DeviceNotFound(format!(
                "no input device matching '{}'",
                search
            )))
        }
        None => host.default_input_device().ok_or(Error::NoDevice),
    }
}

/// Capture `duration_s` seconds of mono audio from an input device.
///
/// Multi-channel input is averaged to mono inside the stream callback.
/// With no explicit rate the device's default rate is used; the actual
/// capture rate is returned alongside the samples.
pub fn record(
    selector: Option<&str>,
    duration_s: f64,
    sample_rate_hz: Option<u32>,
) -> Result<(Vec<f32>, u32)> {
    let host = cpal::default_host();
    let device = find_input_device(&host, selector)?;
    let default_config = device
        .default_input_config()
        .map_err(|e| Error::Stream(e.to_string()))?;

    let sample_rate = sample_rate_hz.unwrap_or_else(|| default_config.sample_rate());
    let channels = default_config.channels();
    let target_frames = (duration_s * f64::from(sample_rate)).ceil() as usize;

    let captured = Arc::new(Mutex::new(Vec::<f32>::with_capacity(target_frames)));

    let config = cpal::StreamConfig {
        channels,
        sample_rate,
        buffer_size: cpal::BufferSize::Default,
    };

    let sink = Arc::clone(&captured);
    let frame_width = channels as usize;
    let stream = device
        .build_input_stream(
            &config,
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                let Ok(mut sink) = sink.lock() else { return };
                for frame in data.chunks(frame_width) {
                    sink.push(frame.iter().sum::<f32>() / frame_width as f32);
                }
            },
            move |err| {
                tracing::warn!(error = %err, "input stream error");
            },
            None,
        )
        .map_err(|e| Error::Stream(e.to_string()))?;

    stream.play().map_err(|e| Error::Stream(e.to_string()))?;
    tracing::info!(sample_rate, channels, duration_s, "capture started");

    // The callback fills the shared buffer; poll until enough frames
    // landed. The deadline covers stalled streams.
    let deadline = Instant::now() + Duration::from_secs_f64(duration_s * 2.0 + 2.0);
    loop {
        std::thread::sleep(Duration::from_millis(50));
        let filled = captured.lock().map(|g| g.len()).unwrap_or(0);
        if filled >= target_frames {
            break;
        }
        if Instant::now() > deadline {
            return Err(Error::Stream(format!(
                "capture stalled at {filled}/{target_frames} frames"
            )));
        }
    }
    drop(stream);

    let guard = captured
        .lock()
        .map_err(|_| Error::Stream("capture buffer poisoned".into()))?;
    let mut samples = guard.clone();
    samples.truncate(target_frames);

    tracing::info!(frames = samples.len(), "capture finished");
    Ok((samples, sample_rate))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_input_devices_does_not_panic() {
        // Device availability depends on the machine; the call itself
        // must always succeed.
        let result = list_input_devices();
        assert!(result.is_ok());
    }

    #[test]
    fn test_unknown_device_name_is_reported() {
        let host = cpal::default_host();
        let result = find_input_device(&host, Some("no-such-device-xyz"));
        assert!(matches!(
            result,
            Err(Error::DeviceNotFound(_)) | Err(Error::Stream(_))
        ));
    }
}
