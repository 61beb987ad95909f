//! Document assembly
//!
//! A document is an ordered list of pages, each possibly drawing a different
//! tournament. Tournaments are loaded once per document through an explicit
//! cache the assembler owns, and every page is written as its own SVG file.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::bracket::BracketModel;
use crate::locale::StringTable;
use crate::page::{DocumentArgs, PageContext};
use crate::schedule::Schedule;
use crate::{render_page_with_config, PosterConfig, PosterError};

/// Bracket models keyed by tournament name
///
/// Names resolve to `<dir>/<name>.toml` the first time they are asked for.
#[derive(Debug, Default)]
pub struct TournamentCache {
    dir: PathBuf,
    models: HashMap<String, BracketModel>,
}

impl TournamentCache {
    /// A cache loading schedules from `dir`
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            models: HashMap::new(),
        }
    }

    /// Seed the cache with an already built model
    pub fn insert(&mut self, name: impl Into<String>, model: BracketModel) {
        self.models.insert(name.into(), model);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// The model for `name`, loading and building it on first use
    pub fn get_or_load(&mut self, name: &str) -> Result<&BracketModel, PosterError> {
        match self.models.entry(name.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let path = self.dir.join(format!("{}.toml", name));
                debug!(tournament = name, path = %path.display(), "loading tournament");
                let schedule = Schedule::from_file(&path)?;
                Ok(entry.insert(BracketModel::build(&schedule)?))
            }
        }
    }
}

/// One rendered page and the file name it is written under
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedPage {
    pub file_name: String,
    pub svg: String,
}

/// Output file name for a page
///
/// `<tournament>[-<suffix>][-<locale>-<tz>][-<index>].svg`, with the locale
/// lowercased. The 1-based index is only added when the document has more
/// than one page, so names never collide.
pub fn file_name(
    tournament: &str,
    suffix: &str,
    locale_tz: Option<(&str, &str)>,
    index: Option<usize>,
) -> String {
    let mut name = tournament.to_string();
    if !suffix.is_empty() {
        name.push('-');
        name.push_str(suffix);
    }
    if let Some((locale, tz)) = locale_tz {
        name.push_str(&format!("-{}-{}", locale.to_lowercase(), tz.to_lowercase()));
    }
    if let Some(index) = index {
        name.push_str(&format!("-{}", index));
    }
    name.push_str(".svg");
    name
}

/// Renders every page of a document
pub struct DocumentAssembler<'a> {
    args: &'a DocumentArgs,
    strings: &'a StringTable,
    config: &'a PosterConfig,
    cache: TournamentCache,
}

impl<'a> DocumentAssembler<'a> {
    pub fn new(
        args: &'a DocumentArgs,
        strings: &'a StringTable,
        config: &'a PosterConfig,
        cache: TournamentCache,
    ) -> Self {
        Self {
            args,
            strings,
            config,
            cache,
        }
    }

    pub fn cache(&self) -> &TournamentCache {
        &self.cache
    }

    /// Render the pages in order; the first failure stops the document
    pub fn render(&mut self) -> Result<Vec<RenderedPage>, PosterError> {
        let args = self.args;
        let multi_page = args.pages.len() > 1;
        let mut rendered = Vec::with_capacity(args.pages.len());

        for (index, page) in args.pages.iter().enumerate() {
            let tournament = args.tournament_for(page);
            let model = self.cache.get_or_load(tournament)?;
            let ctx = PageContext::new(page, model, self.strings)?;
            let svg = render_page_with_config(&ctx, self.config)?;

            let locale = ctx.locale.tag();
            let file_name = file_name(
                tournament,
                &args.file_suffix,
                args.locale_tz_suffix
                    .then_some((locale.as_str(), ctx.tz_abbreviation.as_str())),
                multi_page.then_some(index + 1),
            );
            debug!(page = index + 1, file = %file_name, paper = ctx.paper.name(), "rendered page");
            rendered.push(RenderedPage { file_name, svg });
        }
        Ok(rendered)
    }

    /// Render and write every page under the document's output directory
    pub fn write(&mut self) -> Result<Vec<PathBuf>, PosterError> {
        let dir = self.args.output_dir.clone();
        let pages = self.render()?;

        fs::create_dir_all(&dir).map_err(|source| write_error(&dir, source))?;
        let mut written = Vec::with_capacity(pages.len());
        for page in pages {
            let path = dir.join(&page.file_name);
            fs::write(&path, page.svg).map_err(|source| write_error(&path, source))?;
            info!(path = %path.display(), "wrote page");
            written.push(path);
        }
        Ok(written)
    }
}

fn write_error(path: &Path, source: std::io::Error) -> PosterError {
    PosterError::Write {
        path: path.display().to_string(),
        source,
    }
}
