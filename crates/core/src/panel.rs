//! Panel render-pass orchestration.
//!
//! `ImagePanel` tracks the host-driven inputs of a render pass (options,
//! measured container size, current image URL) and turns user drags into a
//! complete new options object handed to the host through an
//! [`OptionsSink`]. It never edits its own options in place: the host
//! persists the update and passes the new options back via `set_options`.

use crate::editor;
use crate::error::{ImageItError, Result};
use crate::operator::OperatorRegistry;
use crate::presentation::{SensorAssembler, SensorPresentation};
use crate::resolver::MappingResolver;
use crate::series::ValueSource;
use crate::transform::{to_percent, Dimensions, PixelPosition};
use crate::variables::VariableInterpolator;
use imageit_types::PanelOptions;
use log::{debug, info, warn};
use serde::Serialize;
use uuid::Uuid;

/// Receives the full updated options after every user edit
pub trait OptionsSink {
    fn options_changed(&mut self, options: PanelOptions);
}

impl<F: FnMut(PanelOptions)> OptionsSink for F {
    fn options_changed(&mut self, options: PanelOptions) {
        self(options)
    }
}

/// Output of one render pass
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PanelPresentation {
    pub image_url: String,
    pub container: Dimensions,
    /// Base font size for sensor widgets, in pixels
    pub font_size: f64,
    pub sensors: Vec<SensorPresentation>,
}

/// Sensor font size scales with the rendered image width
pub fn sensor_font_size(sensors_text_size: f64, container_width: f64) -> f64 {
    (sensors_text_size * container_width) / 50.0 / 10.0
}

/// Image URL for the next render, with a fresh cache-busting token when
/// `force_refresh` is set
pub fn image_url(url: &str, force_refresh: bool) -> String {
    if force_refresh {
        format!("{}?{}", url, Uuid::new_v4().simple())
    } else {
        url.to_string()
    }
}

/// Options with sensor `index` moved to a pixel position inside `container`.
///
/// Fails on a container without layout size, where no percentage position
/// exists.
pub fn move_sensor(
    options: &PanelOptions,
    index: usize,
    position: PixelPosition,
    container: Dimensions,
) -> Result<PanelOptions> {
    if !container.is_laid_out() {
        return Err(ImageItError::ContainerNotLaidOut {
            width: container.width,
            height: container.height,
        });
    }

    let mut sensor = options
        .sensors
        .get(index)
        .cloned()
        .ok_or(ImageItError::IndexOutOfRange {
            index,
            len: options.sensors.len(),
        })?;
    sensor.position = to_percent(position, container);

    Ok(PanelOptions {
        sensors: editor::replace(&options.sensors, index, sensor)?,
        ..options.clone()
    })
}

/// State of one image panel between host callbacks
pub struct ImagePanel<S: OptionsSink> {
    options: PanelOptions,
    container: Dimensions,
    image_url: String,
    sink: S,
}

impl<S: OptionsSink> ImagePanel<S> {
    pub fn new(options: PanelOptions, sink: S) -> Self {
        let image_url = image_url(&options.image_url, options.force_image_refresh);
        Self {
            options,
            container: Dimensions::default(),
            image_url,
            sink,
        }
    }

    pub fn options(&self) -> &PanelOptions {
        &self.options
    }

    pub fn container(&self) -> Dimensions {
        self.container
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    /// Host delivered new (or persisted) options. The image URL is only
    /// rebuilt when the image settings changed.
    pub fn set_options(&mut self, options: PanelOptions) {
        if options.image_url != self.options.image_url
            || options.force_image_refresh != self.options.force_image_refresh
        {
            self.image_url = image_url(&options.image_url, options.force_image_refresh);
        }
        self.options = options;
    }

    /// Host delivered new data; refreshes the image when forced
    pub fn on_data_refresh(&mut self) {
        if self.options.force_image_refresh {
            self.image_url = image_url(&self.options.image_url, true);
            debug!("Image refresh forced: {}", self.image_url);
        }
    }

    /// Background image finished loading with the given rendered size
    pub fn on_image_load(&mut self, size: Dimensions) {
        info!("Image loaded at {}x{}", size.width, size.height);
        self.container = size;
    }

    /// Panel was resized and the image re-measured
    pub fn on_resize(&mut self, size: Dimensions) {
        debug!("Container resized to {}x{}", size.width, size.height);
        self.container = size;
    }

    /// Compute the full presentation for the current inputs
    pub fn render(
        &self,
        registry: &OperatorRegistry,
        source: &dyn ValueSource,
        variables: &dyn VariableInterpolator,
    ) -> PanelPresentation {
        let assembler = SensorAssembler::new(MappingResolver::new(registry), variables);

        PanelPresentation {
            image_url: self.image_url.clone(),
            container: self.container,
            font_size: sensor_font_size(self.options.sensors_text_size, self.container.width),
            sensors: assembler.assemble(&self.options, source, self.container),
        }
    }

    /// A sensor was dropped at `position` (pixels inside the container).
    ///
    /// Sends the updated options to the sink; local options are unchanged
    /// until the host calls `set_options`.
    pub fn on_sensor_drag_stop(&mut self, index: usize, position: PixelPosition) -> Result<()> {
        if self.options.lock_sensors {
            return Err(ImageItError::SensorsLocked);
        }
        if !self.container.is_laid_out() {
            warn!("Sensor {} moved before the container was laid out", index);
        }

        // Nothing reaches the sink unless the move produced a usable position
        let updated = move_sensor(&self.options, index, position, self.container)?;
        debug!(
            "Sensor {} moved to {:?}",
            index, updated.sensors[index].position
        );
        self.sink.options_changed(updated);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operator::builtin_operators;
    use crate::series::Series;
    use crate::variables::NoVariables;
    use imageit_types::{Position, Sensor};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn options_with_sensor() -> PanelOptions {
        PanelOptions {
            sensors: vec![Sensor::default()],
            ..Default::default()
        }
    }

    #[test]
    fn test_font_size_scales_with_width() {
        assert_eq!(sensor_font_size(10.0, 500.0), 10.0);
        assert_eq!(sensor_font_size(20.0, 250.0), 10.0);
    }

    #[test]
    fn test_image_url_cache_busting() {
        assert_eq!(image_url("http://x/bg.png", false), "http://x/bg.png");

        let a = image_url("http://x/bg.png", true);
        let b = image_url("http://x/bg.png", true);
        assert!(a.starts_with("http://x/bg.png?"));
        assert_ne!(a, b);
    }

    #[test]
    fn test_drag_stop_sends_updated_options() {
        let received = Rc::new(RefCell::new(Vec::new()));
        let sink = {
            let received = Rc::clone(&received);
            move |options: PanelOptions| received.borrow_mut().push(options)
        };

        let mut panel = ImagePanel::new(options_with_sensor(), sink);
        panel.on_image_load(Dimensions::new(400.0, 200.0));
        panel.on_sensor_drag_stop(0, PixelPosition::new(100.0, 150.0)).unwrap();

        let received = received.borrow();
        assert_eq!(received.len(), 1);
        assert_eq!(received[0].sensors[0].position, Position::new(25.0, 75.0));
        // Local options wait for the host
        assert_eq!(panel.options().sensors[0].position, Position::new(50.0, 50.0));
    }

    #[test]
    fn test_drag_stop_rejected_when_locked_or_out_of_range() {
        let mut calls = 0;
        {
            let options = PanelOptions {
                lock_sensors: true,
                ..options_with_sensor()
            };
            let mut panel = ImagePanel::new(options, |_: PanelOptions| calls += 1);
            panel.on_image_load(Dimensions::new(400.0, 200.0));
            assert_eq!(
                panel.on_sensor_drag_stop(0, PixelPosition::new(1.0, 1.0)),
                Err(ImageItError::SensorsLocked)
            );

            panel.set_options(options_with_sensor());
            assert_eq!(
                panel.on_sensor_drag_stop(3, PixelPosition::new(1.0, 1.0)),
                Err(ImageItError::IndexOutOfRange { index: 3, len: 1 })
            );
        }
        assert_eq!(calls, 0);
    }

    #[test]
    fn test_drag_before_layout_is_rejected() {
        let mut calls = 0;
        {
            let mut panel = ImagePanel::new(options_with_sensor(), |_: PanelOptions| calls += 1);
            assert_eq!(
                panel.on_sensor_drag_stop(0, PixelPosition::new(10.0, 10.0)),
                Err(ImageItError::ContainerNotLaidOut {
                    width: 0.0,
                    height: 0.0
                })
            );

            panel.on_image_load(Dimensions::new(0.0, 200.0));
            assert!(panel.on_sensor_drag_stop(0, PixelPosition::new(10.0, 10.0)).is_err());
        }
        assert_eq!(calls, 0);

        let moved = move_sensor(
            &options_with_sensor(),
            0,
            PixelPosition::new(10.0, 10.0),
            Dimensions::default(),
        );
        assert!(moved.is_err());
    }

    #[test]
    fn test_data_refresh_renews_forced_image_url() {
        let options = PanelOptions {
            image_url: "http://x/bg.png".to_string(),
            force_image_refresh: true,
            ..Default::default()
        };
        let mut panel = ImagePanel::new(options, |_: PanelOptions| {});

        let first = panel.image_url().to_string();
        assert!(first.starts_with("http://x/bg.png?"));
        panel.on_data_refresh();
        let second = panel.image_url().to_string();
        assert!(second.starts_with("http://x/bg.png?"));
        assert_ne!(first, second);
    }

    #[test]
    fn test_data_refresh_keeps_plain_image_url() {
        let options = PanelOptions {
            image_url: "http://x/bg.png".to_string(),
            ..Default::default()
        };
        let mut panel = ImagePanel::new(options, |_: PanelOptions| {});

        panel.on_data_refresh();
        assert_eq!(panel.image_url(), "http://x/bg.png");
    }

    #[test]
    fn test_set_options_renews_url_only_when_image_settings_change() {
        let options = PanelOptions {
            image_url: "http://x/bg.png".to_string(),
            force_image_refresh: true,
            ..Default::default()
        };
        let mut panel = ImagePanel::new(options.clone(), |_: PanelOptions| {});
        let first = panel.image_url().to_string();

        // A sensor edit leaves the image alone
        panel.set_options(PanelOptions {
            lock_sensors: true,
            ..options.clone()
        });
        assert_eq!(panel.image_url(), first);

        panel.set_options(PanelOptions {
            force_image_refresh: false,
            ..options
        });
        assert_eq!(panel.image_url(), "http://x/bg.png");
    }

    #[test]
    fn test_render_uses_measured_container() {
        let mut panel = ImagePanel::new(options_with_sensor(), |_: PanelOptions| {});
        panel.on_image_load(Dimensions::new(400.0, 200.0));
        panel.on_resize(Dimensions::new(800.0, 400.0));

        let series = vec![Series::new(Some("A"), None, vec![Some(12.0.into())])];
        let out = panel.render(builtin_operators(), &series, &NoVariables);

        assert_eq!(out.container, Dimensions::new(800.0, 400.0));
        assert_eq!(out.font_size, 16.0);
        assert_eq!(out.sensors[0].position, PixelPosition::new(400.0, 200.0));
        assert_eq!(out.sensors[0].text, "12.00");
    }
}
