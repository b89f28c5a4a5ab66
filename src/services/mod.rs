pub mod collector;
pub mod debug_capture;
pub mod form_filler;
pub mod navigator;
pub mod overlay;
pub mod profile_service;
pub mod results_writer;
pub mod search_service;
pub mod session;

pub use collector::{collect_job_links, normalize_links};
pub use debug_capture::{capture_page, CaptureArtifacts};
pub use form_filler::{ApplicantProfile, FormFiller, UploadOutcome};
pub use navigator::Navigator;
pub use overlay::dismiss_overlays;
pub use profile_service::{ProfileService, StepReport, StepStatus};
pub use results_writer::ResultsWriter;
pub use search_service::{SearchOutcome, SearchPath, SearchService};
pub use session::{LoginOutcome, SessionService};
