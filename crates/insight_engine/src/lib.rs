//! Insight engine: every stage that talks to the outside world, plus the
//! pipeline that strings them together.
mod analysis;
mod decode;
mod direct;
mod extract;
mod feed;
mod fetch;
mod pdf;
mod pipeline;
mod redirect;
mod settings;

pub use analysis::{AnalysisRequestor, ModelCallError, ModelClient, OllamaClient};
pub use decode::{decode_page, DecodeError, DecodedPage};
pub use direct::HttpTextFetcher;
pub use extract::{HtmlTextExtractor, ReadabilityLikeExtractor};
pub use feed::HeadlineResolver;
pub use fetch::{ProcessTextFetcher, TextFetcher};
pub use pdf::PdfExtractor;
pub use pipeline::{Pipeline, URL_ANALYSIS_TITLE};
pub use redirect::RedirectResolver;
pub use settings::{
    EngineSettings, FeedSettings, FetchStrategy, HttpFetchSettings, ModelSettings,
    ProcessSettings, RedirectSettings,
};
