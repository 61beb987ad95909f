//! Page requests and the per-page context derived from them
//!
//! A document is a list of pages, each naming a page kind, locale, viewer
//! timezone, paper and a set of drawing toggles. Documents load from TOML:
//!
//! ```toml
//! tournament = "2026-mens-world-cup"
//! output-dir = "posters"
//! locale-tz-suffix = true
//!
//! [[page]]
//! locale = "fa"
//! timezone = "Asia/Tehran"
//!
//! [[page]]
//! kind = "cal-only"
//! paper = "tabloid"
//! ```

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::Deserialize;
use thiserror::Error;

use crate::bracket::BracketModel;
use crate::error::ScheduleError;
use crate::layout::DisplaySchedule;
use crate::locale::{parse_tz, tz_abbreviation, tz_header, Locale, LocaleError, StringTable};
use crate::paper::{Orientation, PageFrame, Paper, PaperError};

/// Errors in page requests or while resolving them
#[derive(Error, Debug)]
pub enum PageError {
    #[error("Failed to read document file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse document TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// A crop size only makes sense against an explicit paper size
    #[error("crop '{crop}' needs an explicit paper size")]
    CropWithoutPaper { crop: String },

    #[error("unknown page kind '{name}' (expected cal-elim or cal-only)")]
    UnknownKind { name: String },

    #[error("document has no pages")]
    NoPages,

    #[error(transparent)]
    Locale(#[from] LocaleError),

    #[error(transparent)]
    Paper(#[from] PaperError),

    #[error(transparent)]
    Schedule(#[from] ScheduleError),
}

/// Page archetype
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PageKind {
    /// Group matches on the calendar, elimination rounds in a bracket
    #[default]
    CalElim,
    /// Every match but the final on the calendar
    CalOnly,
}

impl PageKind {
    pub fn parse(s: &str) -> Result<Self, PageError> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "cal-elim" => Ok(PageKind::CalElim),
            "cal-only" => Ok(PageKind::CalOnly),
            _ => Err(PageError::UnknownKind {
                name: s.to_string(),
            }),
        }
    }
}

/// Everything that varies between pages of a document
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PageArgs {
    pub kind: PageKind,
    /// Tournament for this page; the document's tournament when absent
    pub tournament: Option<String>,
    pub orientation: Orientation,
    /// IANA name of the viewer's timezone
    pub timezone: String,
    pub locale: String,
    /// Free text shown in the footer
    pub variant: String,
    /// Paper name; picked to fit the team count when absent
    pub paper: Option<String>,
    /// Trim size centered inside the paper
    pub crop: Option<String>,
    pub main_borders: bool,
    pub elimination_borders: bool,
    pub match_numbers: bool,
    /// Group letter in the corner of calendar match slots
    pub group_hints: bool,
    /// Feeder group letters on later bracket cells
    pub elimination_hints: bool,
    /// Tally dots in the group standings columns
    pub group_dots: bool,
    pub results: bool,
}

impl Default for PageArgs {
    fn default() -> Self {
        Self {
            kind: PageKind::CalElim,
            tournament: None,
            orientation: Orientation::Landscape,
            timezone: "US/Pacific".to_string(),
            locale: "en_US".to_string(),
            variant: String::new(),
            paper: None,
            crop: None,
            main_borders: true,
            elimination_borders: true,
            match_numbers: false,
            group_hints: false,
            elimination_hints: true,
            group_dots: true,
            results: false,
        }
    }
}

impl PageArgs {
    pub fn new(kind: PageKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = locale.into();
        self
    }

    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = timezone.into();
        self
    }

    pub fn with_paper(mut self, paper: impl Into<String>) -> Self {
        self.paper = Some(paper.into());
        self
    }

    pub fn with_crop(mut self, crop: impl Into<String>) -> Self {
        self.crop = Some(crop.into());
        self
    }

    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    pub fn with_results(mut self, results: bool) -> Self {
        self.results = results;
        self
    }

    pub fn with_match_numbers(mut self, match_numbers: bool) -> Self {
        self.match_numbers = match_numbers;
        self
    }

    pub fn with_tournament(mut self, tournament: impl Into<String>) -> Self {
        self.tournament = Some(tournament.into());
        self
    }
}

/// A list of pages rendered together
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct DocumentArgs {
    /// Default tournament for pages that do not name one
    pub tournament: String,
    #[serde(rename = "page")]
    pub pages: Vec<PageArgs>,
    pub output_dir: PathBuf,
    /// Appended to the output file name
    pub file_suffix: String,
    /// Append each page's locale and timezone abbreviation to the file name
    pub locale_tz_suffix: bool,
}

impl Default for DocumentArgs {
    fn default() -> Self {
        Self {
            tournament: String::new(),
            pages: vec![PageArgs::default()],
            output_dir: PathBuf::from("."),
            file_suffix: String::new(),
            locale_tz_suffix: false,
        }
    }
}

impl DocumentArgs {
    pub fn from_file(path: &Path) -> Result<Self, PageError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(content: &str) -> Result<Self, PageError> {
        let args: DocumentArgs = toml::from_str(content)?;
        if args.pages.is_empty() {
            return Err(PageError::NoPages);
        }
        Ok(args)
    }

    /// Tournament a page draws
    pub fn tournament_for<'a>(&'a self, page: &'a PageArgs) -> &'a str {
        page.tournament.as_deref().unwrap_or(&self.tournament)
    }
}

/// A page request resolved against its tournament
#[derive(Debug, Clone)]
pub struct PageContext<'a> {
    pub args: &'a PageArgs,
    pub model: &'a BracketModel,
    pub strings: &'a StringTable,
    pub locale: Locale,
    pub viewer_tz: Tz,
    pub paper: Paper,
    pub frame: PageFrame,
    pub display: DisplaySchedule,
    /// Timezone abbreviation at the first match, e.g. `PDT`
    pub tz_abbreviation: String,
    /// Timezone header text, e.g. `PDT (UTC-7)`
    pub tz_header: String,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
    /// `country.` or `club.`
    team_prefix: &'static str,
}

impl<'a> PageContext<'a> {
    pub fn new(
        args: &'a PageArgs,
        model: &'a BracketModel,
        strings: &'a StringTable,
    ) -> Result<Self, PageError> {
        let locale = Locale::parse(&args.locale)?;
        let viewer_tz = parse_tz(&args.timezone)?;
        let home_tz = parse_tz(model.properties().timezone()?)?;

        let paper = match (&args.paper, &args.crop) {
            (Some(name), _) => Paper::parse(name)?,
            (None, Some(crop)) => {
                return Err(PageError::CropWithoutPaper { crop: crop.clone() });
            }
            (None, None) => Paper::best_fit(model.team_count(), &locale)?,
        };
        let crop = args.crop.as_deref().map(Paper::parse).transpose()?;
        let frame = PageFrame::new(&paper, args.orientation, crop.as_ref());

        let display = DisplaySchedule::build(model.matches(), home_tz, viewer_tz, locale.hour12());
        let dates: Vec<NaiveDate> = model
            .matches()
            .iter()
            .filter_map(|m| display.date(m.id()))
            .collect();
        let first_date = dates.iter().min().copied().unwrap_or_default();
        let last_date = dates.iter().max().copied().unwrap_or_default();

        let first_start = model
            .matches()
            .iter()
            .map(|m| m.info.start)
            .min()
            .unwrap_or_default();

        Ok(Self {
            args,
            model,
            strings,
            viewer_tz,
            paper,
            frame,
            display,
            tz_abbreviation: tz_abbreviation(viewer_tz, first_start),
            tz_header: tz_header(viewer_tz, first_start),
            first_date,
            last_date,
            team_prefix: model.team_key_prefix(strings),
            locale,
        })
    }

    /// Localized text for `key`
    pub fn text(&self, key: &str) -> Result<&'a str, LocaleError> {
        self.strings.get(key, &self.locale)
    }

    /// Localized team name
    pub fn team_name(&self, team: &str) -> Result<&'a str, LocaleError> {
        self.text(&format!("{}{}", self.team_prefix, team))
    }

    pub fn is_rtl(&self) -> bool {
        self.locale.is_rtl()
    }
}
