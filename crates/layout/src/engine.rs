use std::mem;
use std::sync::Arc;

use vitae_font::{FontResolver, ResolvedFont};
use vitae_render::{Page, PageCanvas};
use vitae_style::{FontFamilySpec, FontWeight, SectionDecoration, ThemeConfig};
use vitae_text::{layout_runs, text_width, wrap, TextMeasurer};
use vitae_types::script::contains_cjk;
use vitae_types::{EducationItem, ExperienceItem, Margins, PageSize, ProjectItem, Resume, Rgb, Script, SkillGroup};

const NAME_SIZE: f32 = 24.0;
const LABEL_SIZE: f32 = 12.0;
const CONTACT_SIZE: f32 = 9.5;
const SECTION_TITLE_SIZE: f32 = 13.0;
const ITEM_TITLE_SIZE: f32 = 11.0;
const BODY_SIZE: f32 = 10.0;
const META_SIZE: f32 = 9.0;
const LINE_FACTOR: f32 = 1.45;

/// Highlight bullets drawn per item; extra entries are dropped.
pub const HIGHLIGHT_CAP: usize = 4;

/// Section traversal order. Empty sections are skipped; the order never
/// changes, whatever the theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Header,
    Summary,
    Education,
    Experience,
    Projects,
    Skills,
}

impl Section {
    const ORDER: [Section; 6] = [
        Section::Header,
        Section::Summary,
        Section::Education,
        Section::Experience,
        Section::Projects,
        Section::Skills,
    ];

    fn is_empty(self, resume: &Resume) -> bool {
        match self {
            Section::Header => false,
            Section::Summary => !resume.has_summary(),
            Section::Education => resume.education.is_empty(),
            Section::Experience => resume.experience.is_empty(),
            Section::Projects => resume.projects.is_empty(),
            Section::Skills => resume.skills.is_empty(),
        }
    }
}

/// Walks a resume and emits finished pages.
///
/// The vertical cursor `y` starts at the top margin and decreases with
/// every draw. Before an item's title line is drawn the engine checks the
/// remaining room and starts a fresh page if the line would cross the
/// bottom margin: a title line is never split across pages. Wrapped
/// descriptions and highlights may spill page by page.
pub struct LayoutEngine<'a> {
    theme: &'a ThemeConfig,
    page_size: PageSize,
    family: &'a FontFamilySpec,
    resolver: &'a FontResolver,
    measurer: TextMeasurer,
    margins: Margins,
    pages: Vec<Page>,
    canvas: PageCanvas,
    y: f32,
}

impl<'a> LayoutEngine<'a> {
    pub fn new(
        theme: &'a ThemeConfig,
        page_size: PageSize,
        family: &'a FontFamilySpec,
        resolver: &'a FontResolver,
        measurer: TextMeasurer,
    ) -> Self {
        let margins = Margins::default();
        let y = page_size.height() - margins.top;
        Self {
            theme,
            page_size,
            family,
            resolver,
            measurer,
            margins,
            pages: Vec::new(),
            canvas: PageCanvas::new(page_size),
            y,
        }
    }

    /// Renders the whole resume and returns the finished pages.
    pub fn run(mut self, resume: &Resume) -> Vec<Page> {
        for section in Section::ORDER {
            if section.is_empty(resume) {
                continue;
            }
            match section {
                Section::Header => self.header(resume),
                Section::Summary => {
                    self.section_title("Summary");
                    if let Some(summary) = &resume.summary {
                        self.wrapped(summary, BODY_SIZE, FontWeight::Regular, self.theme.text, 0.0);
                    }
                }
                Section::Education => self.education(&resume.education),
                Section::Experience => self.experience(&resume.experience),
                Section::Projects => self.projects(&resume.projects),
                Section::Skills => self.skills(&resume.skills),
            }
        }

        self.pages.push(self.canvas.finish());
        log::debug!("layout finished: {} page(s)", self.pages.len());
        self.pages
    }

    fn left(&self) -> f32 {
        self.margins.left
    }

    fn right(&self) -> f32 {
        self.page_size.width() - self.margins.right
    }

    fn content_width(&self) -> f32 {
        self.right() - self.left()
    }

    fn line_height(size: f32) -> f32 {
        size * LINE_FACTOR
    }

    fn break_page(&mut self) {
        let canvas = mem::replace(&mut self.canvas, PageCanvas::new(self.page_size));
        self.pages.push(canvas.finish());
        self.y = self.page_size.height() - self.margins.top;
        log::debug!("page break -> page {}", self.pages.len() + 1);
    }

    /// Starts a new page when `needed` points would cross the bottom margin.
    fn ensure_room(&mut self, needed: f32) {
        if self.y - needed < self.margins.bottom {
            self.break_page();
        }
    }

    /// Draws one line of mixed-script text at an explicit baseline without
    /// moving the cursor.
    fn draw_at(&mut self, x: f32, baseline: f32, text: &str, size: f32, weight: FontWeight, color: Rgb) {
        let runs = layout_runs(text, self.resolver, self.family, weight, size, &self.measurer);
        for run in runs {
            self.canvas.text(x + run.x, baseline, size, color, run.font, run.text);
        }
    }

    /// Draws one cursor-advancing line of text.
    fn line(&mut self, text: &str, size: f32, weight: FontWeight, color: Rgb) {
        let lh = Self::line_height(size);
        self.ensure_room(lh);
        let baseline = self.y - size;
        self.draw_at(self.left(), baseline, text, size, weight, color);
        self.y -= lh;
    }

    fn measure(&self, text: &str, size: f32, weight: FontWeight) -> f32 {
        text_width(text, self.resolver, self.family, weight, size, &self.measurer)
    }

    /// The font the wrapper measures against: the CJK-capable resolution
    /// when the text needs one, the Latin resolution otherwise.
    fn wrap_font(&self, text: &str) -> Arc<ResolvedFont> {
        let hint = if contains_cjk(text) { Script::Cjk } else { Script::Latin };
        self.resolver.resolve(self.family, FontWeight::Regular, hint)
    }

    /// Wraps and draws a block of text, advancing the cursor per line.
    /// Long blocks may spill across page breaks.
    fn wrapped(&mut self, text: &str, size: f32, weight: FontWeight, color: Rgb, indent: f32) {
        let font = self.wrap_font(text);
        let max_width = self.content_width() - indent;
        let lh = Self::line_height(size);
        for line in wrap(text, max_width, &font, size, &self.measurer) {
            self.ensure_room(lh);
            let baseline = self.y - size;
            self.draw_at(self.left() + indent, baseline, &line, size, weight, color);
            self.y -= lh;
        }
    }

    /// Section gap plus themed title with its decorative draw call.
    fn section_title(&mut self, title: &str) {
        self.y -= self.theme.spacing.section_gap;
        let lh = Self::line_height(SECTION_TITLE_SIZE);
        self.ensure_room(lh);
        let baseline = self.y - SECTION_TITLE_SIZE;

        match self.theme.decoration {
            SectionDecoration::None => {}
            SectionDecoration::TimelineDot => {
                self.canvas.fill_circle(
                    self.left() - 9.0,
                    baseline + SECTION_TITLE_SIZE * 0.35,
                    2.6,
                    self.theme.accent,
                );
            }
            SectionDecoration::Underline => {
                self.canvas.stroke_line(
                    self.left(),
                    baseline - 3.0,
                    self.right(),
                    baseline - 3.0,
                    0.8,
                    self.theme.accent,
                );
            }
            SectionDecoration::Card => {
                self.canvas.fill_rect(
                    self.left() - 6.0,
                    baseline - 4.0,
                    self.content_width() + 12.0,
                    SECTION_TITLE_SIZE + 9.0,
                    lighten(self.theme.light, 0.8),
                );
            }
        }

        self.draw_at(self.left(), baseline, title, SECTION_TITLE_SIZE, FontWeight::Bold, self.theme.primary);
        self.y -= lh + self.theme.spacing.line_gap;
    }

    /// An item's title line: bold left text with a right-aligned date
    /// range on the same baseline. The line is atomic across pages.
    fn item_header(&mut self, left_text: &str, date: &str) {
        let lh = Self::line_height(ITEM_TITLE_SIZE);
        self.ensure_room(lh);
        let baseline = self.y - ITEM_TITLE_SIZE;
        self.draw_at(self.left(), baseline, left_text, ITEM_TITLE_SIZE, FontWeight::Bold, self.theme.primary);
        if !date.is_empty() {
            let width = self.measure(date, META_SIZE, FontWeight::Regular);
            self.draw_at(self.right() - width, baseline, date, META_SIZE, FontWeight::Regular, self.theme.light);
        }
        self.y -= lh;
    }

    fn header(&mut self, resume: &Resume) {
        self.line(&resume.name, NAME_SIZE, FontWeight::Bold, self.theme.primary);

        if let Some(label) = resume.label.as_deref().filter(|l| !l.trim().is_empty()) {
            self.line(label, LABEL_SIZE, FontWeight::Regular, self.theme.secondary);
        }

        let contact: Vec<&str> = [
            Some(resume.email.as_str()),
            resume.phone.as_deref(),
            resume.location.as_deref(),
            resume.website.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.trim().is_empty())
        .collect();
        if !contact.is_empty() {
            self.line(&contact.join("  ·  "), CONTACT_SIZE, FontWeight::Regular, self.theme.light);
        }

        self.y -= self.theme.spacing.line_gap;
        let rule_y = self.y;
        self.canvas.stroke_line(self.left(), rule_y, self.right(), rule_y, 1.2, self.theme.accent);
        self.y -= self.theme.spacing.line_gap;
    }

    fn experience(&mut self, items: &[ExperienceItem]) {
        self.section_title("Experience");
        for (index, item) in items.iter().enumerate() {
            if index > 0 {
                self.y -= self.theme.spacing.item_gap;
            }
            let title = join_nonempty(&[item.title.as_str(), item.company.as_str()], ", ");
            let date = fmt_date_range(item.start_date.as_deref(), item.end_date.as_deref(), item.current);
            self.item_header(&title, &date);
            self.item_body(
                item.description.as_deref(),
                &item.highlights,
                &item.technologies,
            );
        }
    }

    fn projects(&mut self, items: &[ProjectItem]) {
        self.section_title("Projects");
        for (index, item) in items.iter().enumerate() {
            if index > 0 {
                self.y -= self.theme.spacing.item_gap;
            }
            let date = fmt_date_range(item.start_date.as_deref(), item.end_date.as_deref(), false);
            self.item_header(&item.name, &date);
            if let Some(url) = item.url.as_deref().filter(|u| !u.trim().is_empty()) {
                self.line(url, META_SIZE, FontWeight::Regular, self.theme.accent);
            }
            self.item_body(
                item.description.as_deref(),
                &item.highlights,
                &item.technologies,
            );
        }
    }

    /// Description, capped highlight bullets, then the technology line.
    fn item_body(&mut self, description: Option<&str>, highlights: &[String], technologies: &[String]) {
        if let Some(description) = description.filter(|d| !d.trim().is_empty()) {
            self.wrapped(description, BODY_SIZE, FontWeight::Regular, self.theme.text, 0.0);
        }
        for highlight in highlights.iter().take(HIGHLIGHT_CAP) {
            let bullet = format!("- {highlight}");
            self.wrapped(&bullet, BODY_SIZE, FontWeight::Regular, self.theme.text, self.theme.spacing.bullet_indent);
        }
        if !technologies.is_empty() {
            let line = technologies.join(" · ");
            self.wrapped(&line, META_SIZE, FontWeight::Regular, self.theme.secondary, 0.0);
        }
    }

    fn education(&mut self, items: &[EducationItem]) {
        self.section_title("Education");
        for (index, item) in items.iter().enumerate() {
            if index > 0 {
                self.y -= self.theme.spacing.item_gap;
            }
            let date = fmt_date_range(item.start_date.as_deref(), item.end_date.as_deref(), item.current);
            self.item_header(&item.institution, &date);

            let mut subtitle_parts: Vec<String> = Vec::new();
            if let Some(degree) = item.degree.as_deref().filter(|d| !d.trim().is_empty()) {
                subtitle_parts.push(degree.to_string());
            }
            if let Some(area) = item.area.as_deref().filter(|a| !a.trim().is_empty()) {
                subtitle_parts.push(area.to_string());
            }
            if let Some(score) = item.score.as_deref().filter(|s| !s.trim().is_empty()) {
                subtitle_parts.push(format!("GPA {score}"));
            }
            if !subtitle_parts.is_empty() {
                self.line(&subtitle_parts.join(", "), BODY_SIZE, FontWeight::Regular, self.theme.secondary);
            }
        }
    }

    fn skills(&mut self, groups: &[SkillGroup]) {
        self.section_title("Skills");
        for group in groups {
            let mut line = group.name.clone();
            if let Some(level) = group.level.as_deref().filter(|l| !l.trim().is_empty()) {
                line.push_str(&format!(" ({level})"));
            }
            if !group.keywords.is_empty() {
                line.push_str(": ");
                line.push_str(&group.keywords.join(", "));
            }
            self.wrapped(&line, BODY_SIZE, FontWeight::Regular, self.theme.text, 0.0);
        }
    }
}

/// "start - end", with "Now" standing in for the end of current items.
/// Dates render verbatim; the engine does not parse them.
pub fn fmt_date_range(start: Option<&str>, end: Option<&str>, current: bool) -> String {
    let start = start.unwrap_or("").trim();
    let end = if current { "Now" } else { end.unwrap_or("").trim() };
    match (start.is_empty(), end.is_empty()) {
        (true, true) => String::new(),
        (false, true) => start.to_string(),
        (true, false) => end.to_string(),
        (false, false) => format!("{start} - {end}"),
    }
}

fn join_nonempty(parts: &[&str], separator: &str) -> String {
    parts
        .iter()
        .filter(|p| !p.trim().is_empty())
        .copied()
        .collect::<Vec<&str>>()
        .join(separator)
}

fn lighten(color: Rgb, amount: f32) -> Rgb {
    Rgb::new(
        color.r + (1.0 - color.r) * amount,
        color.g + (1.0 - color.g) * amount,
        color.b + (1.0 - color.b) * amount,
    )
}
