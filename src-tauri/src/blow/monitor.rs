use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample};
use log::{debug, error, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::level::{rms, BlowLatch, SampleWindow, ANALYSIS_WINDOW, BLOW_RMS_THRESHOLD};

/// RMS check cadence - one tick per display frame at 60Hz.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    #[error("No input device")]
    NoInputDevice,

    #[error("Device error")]
    DeviceError,

    #[error("Failed to build stream: {0}")]
    BuildStreamError(#[from] cpal::BuildStreamError),

    #[error("Failed to play stream: {0}")]
    PlayStreamError(#[from] cpal::PlayStreamError),
}

/// Microphone amplitude monitor.
///
/// `start` opens the default input device and watches its level; the first
/// RMS window above [`BLOW_RMS_THRESHOLD`] invokes the callback exactly
/// once, after which the sampler stops processing. Permission denial or a
/// missing device surfaces as an error from `start` and the callback never
/// fires.
pub struct BlowMonitor;

impl BlowMonitor {
    pub fn start(on_blow: impl FnOnce() + Send + 'static) -> Result<BlowSession, MonitorError> {
        let host = cpal::default_host();
        let device = host
            .default_input_device()
            .ok_or(MonitorError::NoInputDevice)?;

        let config = device
            .default_input_config()
            .map_err(|_| MonitorError::DeviceError)?;

        let channels = config.channels() as usize;
        let window = Arc::new(Mutex::new(SampleWindow::new(ANALYSIS_WINDOW)));

        let stream = match config.sample_format() {
            cpal::SampleFormat::I8 => {
                build_input_stream::<i8>(&device, &config.into(), channels, Arc::clone(&window))?
            }
            cpal::SampleFormat::I16 => {
                build_input_stream::<i16>(&device, &config.into(), channels, Arc::clone(&window))?
            }
            cpal::SampleFormat::I32 => {
                build_input_stream::<i32>(&device, &config.into(), channels, Arc::clone(&window))?
            }
            cpal::SampleFormat::F32 => {
                build_input_stream::<f32>(&device, &config.into(), channels, Arc::clone(&window))?
            }
            _ => return Err(MonitorError::DeviceError),
        };

        stream.play()?;

        let shutdown = Arc::new(AtomicBool::new(false));
        let sampler = spawn_sampler(window, Arc::clone(&shutdown), on_blow);

        info!("Blow monitor armed (threshold rms {})", BLOW_RMS_THRESHOLD);

        Ok(BlowSession {
            stream: Some(stream),
            shutdown,
            sampler: Some(sampler),
        })
    }
}

/// Live monitoring session - owns the input stream and the sampler thread.
///
/// The stream is not `Send`, so the session must stay on the thread that
/// created it (the cake controller thread).
pub struct BlowSession {
    stream: Option<cpal::Stream>,
    shutdown: Arc<AtomicBool>,
    sampler: Option<JoinHandle<()>>,
}

impl BlowSession {
    /// Release the input device and stop sampling. Idempotent.
    ///
    /// Every release path converges here: self-termination after the
    /// threshold crossing, explicit disarming, and page teardown.
    pub fn stop(&mut self) {
        self.shutdown.store(true, Ordering::SeqCst);

        if let Some(sampler) = self.sampler.take() {
            if sampler.join().is_err() {
                error!("Blow sampler thread panicked");
            }
        }

        if let Some(stream) = self.stream.take() {
            stream.pause().ok();
            drop(stream);
            debug!("Input device released");
        }
    }
}

impl Drop for BlowSession {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Per-frame sampling loop.
///
/// Reads the latest full window, computes RMS, and fires the one-shot
/// callback on the first crossing. The loop exits immediately after firing
/// so no further samples are processed, and checks the shutdown flag before
/// every tick as a guard against scheduling races.
fn spawn_sampler(
    window: Arc<Mutex<SampleWindow>>,
    shutdown: Arc<AtomicBool>,
    on_blow: impl FnOnce() + Send + 'static,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let mut latch = BlowLatch::new();
        let mut on_blow = Some(on_blow);

        loop {
            if shutdown.load(Ordering::SeqCst) {
                break;
            }

            let snapshot = match window.lock() {
                Ok(window) => window.snapshot(),
                Err(_) => None,
            };

            if let Some(samples) = snapshot {
                let level = rms(&samples);
                if latch.check(level) {
                    debug!("Blow detected: rms {:.3}", level);
                    if let Some(callback) = on_blow.take() {
                        callback();
                    }
                    break;
                }
            }

            thread::sleep(FRAME_INTERVAL);
        }
    })
}

fn build_input_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    channels: usize,
    window: Arc<Mutex<SampleWindow>>,
) -> Result<cpal::Stream, MonitorError>
where
    T: Sample + cpal::SizedSample,
    f32: FromSample<T>,
{
    let err_fn = |err| {
        error!("Stream error: {}", err);
    };

    let stream = device.build_input_stream(
        config,
        move |data: &[T], _: &cpal::InputCallbackInfo| {
            push_input_data::<T>(data, channels, &window);
        },
        err_fn,
        None,
    )?;

    Ok(stream)
}

/// Downmix incoming frames to mono f32 in [-1, 1] and feed the window.
fn push_input_data<T>(input: &[T], channels: usize, window: &Arc<Mutex<SampleWindow>>)
where
    T: Sample,
    f32: FromSample<T>,
{
    if input.is_empty() {
        return;
    }

    let channels = channels.max(1);
    let mut mono = Vec::with_capacity(input.len() / channels);
    for frame in input.chunks(channels) {
        let sum: f32 = frame
            .iter()
            .map(|&sample| {
                let normalized: f32 = sample.to_sample();
                normalized
            })
            .sum();
        mono.push(sum / frame.len() as f32);
    }

    if let Ok(mut window) = window.lock() {
        window.extend(&mono);
    }
}
