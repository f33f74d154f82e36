//! Platform service adapters: licensing, capability registry, telemetry.

mod capabilities;
mod license;
mod telemetry;

pub use capabilities::{security_solution_tools, StaticCapabilityRegistry};
pub use license::StaticLicensingService;
pub use telemetry::{RecordingTelemetryReporter, TracingTelemetryReporter};
