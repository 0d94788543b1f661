//! # solarpaper
//!
//! Renders a solar-system "wallpaper" from a precomputed orbit dataset. The `.sso`
//! stream holds sampled heliocentric paths for planets, moons, spacecraft, comets
//! and asteroids; a render pass decodes it record by record, rescales moons around
//! their planets, cuts every path to its recent trail and emits styled vector
//! drawing commands.
//!
//! ```no_run
//! use camino::Utf8Path;
//! use solarpaper::{
//!     config::RenderConfig, renderer::RenderContext, sso::sso_reader::read_sso_file,
//!     surface::CommandRecorder, time::jd_now, view::ViewParameters,
//! };
//!
//! # fn main() -> Result<(), solarpaper::solarpaper_errors::SolarpaperError> {
//! let config = RenderConfig::default();
//! let data = read_sso_file(Utf8Path::new("data/solarsystem.sso"))?;
//! let mut context = RenderContext::new(ViewParameters::from_config(&config)?, jd_now()?);
//! let mut surface = CommandRecorder::new();
//! let summary = context.render_dataset(&data, config.kind_field, &mut surface)?;
//! println!("{} orbits drawn", summary.drawn);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod constants;
pub mod logging;
pub mod renderer;
pub mod satellite;
pub mod solarpaper_errors;
pub mod sso;
pub mod style;
pub mod surface;
pub mod time;
pub mod trail;
pub mod view;
