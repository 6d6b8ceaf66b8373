use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;

use vitae_style::{FontFamilySpec, FontWeight};
use vitae_types::Script;

use crate::{
    builtin, extract_postscript_name, Coverage, DiskFontCache, FontProgramKind, FontSource,
    ResolvedFont,
};

/// Default CJK font package fetched when neither the bundled assets nor the
/// host system can supply CJK coverage.
pub const DEFAULT_CJK_FONT_URL: &str =
    "https://cdn.jsdelivr.net/gh/googlefonts/noto-cjk@main/Sans/OTF/SimplifiedChinese/NotoSansCJKsc-Regular.otf";

const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(20);

/// System font families probed for CJK coverage, most specific first.
const CJK_SYSTEM_FAMILIES: &[&str] = &[
    "Noto Sans CJK SC",
    "Noto Sans CJK JP",
    "Source Han Sans SC",
    "PingFang SC",
    "Hiragino Sans GB",
    "Microsoft YaHei",
    "Malgun Gothic",
    "SimHei",
    "WenQuanYi Micro Hei",
];

#[cfg(target_os = "linux")]
const CJK_FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/droid/DroidSansFallbackFull.ttf",
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "/usr/share/fonts/truetype/arphic/uming.ttc",
];

#[cfg(target_os = "macos")]
const CJK_FONT_PATHS: &[&str] = &[
    "/System/Library/Fonts/PingFang.ttc",
    "/Library/Fonts/Arial Unicode.ttf",
    "/System/Library/Fonts/Hiragino Sans GB.ttc",
];

#[cfg(target_os = "windows")]
const CJK_FONT_PATHS: &[&str] = &[
    "C:\\Windows\\Fonts\\msyh.ttf",
    "C:\\Windows\\Fonts\\msyh.ttc",
    "C:\\Windows\\Fonts\\simhei.ttf",
    "C:\\Windows\\Fonts\\malgun.ttf",
];

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
const CJK_FONT_PATHS: &[&str] = &[];

/// Which chain step produced a resolved font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontOrigin {
    Bundled,
    Cache,
    System,
    Remote,
    Builtin,
}

#[derive(Debug, Clone, Hash, PartialEq, Eq)]
struct MemoKey {
    family: String,
    weight: u16,
    wants_cjk: bool,
    charset: Option<String>,
}

/// Resolves `(family, weight, script)` requests to usable font programs.
///
/// The fallback chain runs at most once per distinct request per resolver:
/// results, including the degraded terminal fallback, are memoized, so a
/// failed probe or fetch is never retried within a run. The on-disk cache
/// persists steps 2-3 across runs.
pub struct FontResolver {
    cache: DiskFontCache,
    asset_dirs: Vec<PathBuf>,
    remote_url: Option<String>,
    fetch_timeout: Duration,
    use_system_fonts: bool,
    fontdb: OnceLock<fontdb::Database>,
    http: OnceLock<Option<reqwest::blocking::Client>>,
    memo: Mutex<HashMap<MemoKey, Arc<ResolvedFont>>>,
}

impl FontResolver {
    pub fn new() -> Self {
        Self::with_cache(DiskFontCache::default_location())
    }

    pub fn with_cache(cache: DiskFontCache) -> Self {
        // Same multi-level probing the asset loader has always needed:
        // workspace root, one crate level down, two down.
        let asset_dirs = vec![
            PathBuf::from("assets/fonts"),
            PathBuf::from("../assets/fonts"),
            PathBuf::from("../../assets/fonts"),
        ];
        Self {
            cache,
            asset_dirs,
            remote_url: Some(DEFAULT_CJK_FONT_URL.to_string()),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
            use_system_fonts: true,
            fontdb: OnceLock::new(),
            http: OnceLock::new(),
            memo: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_asset_dirs(mut self, dirs: Vec<PathBuf>) -> Self {
        self.asset_dirs = dirs;
        self
    }

    pub fn with_remote_url(mut self, url: Option<String>) -> Self {
        self.remote_url = url;
        self
    }

    /// Disables the remote fetch step entirely.
    pub fn offline(self) -> Self {
        self.with_remote_url(None)
    }

    pub fn with_system_fonts(mut self, enable: bool) -> Self {
        self.use_system_fonts = enable;
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }

    pub fn cache(&self) -> &DiskFontCache {
        &self.cache
    }

    /// Resolves a usable font for the request. Total: the worst outcome is
    /// the built-in standard font without CJK glyphs.
    pub fn resolve(
        &self,
        family: &FontFamilySpec,
        weight: FontWeight,
        script_hint: Script,
    ) -> Arc<ResolvedFont> {
        self.resolve_subset(family, weight, script_hint, None)
    }

    /// Like [`resolve`](Self::resolve), but qualifies the cache key with a
    /// hash of the characters that will actually be drawn. Keying only;
    /// the stored program is not glyph-stripped.
    pub fn resolve_subset(
        &self,
        family: &FontFamilySpec,
        weight: FontWeight,
        script_hint: Script,
        charset: Option<&str>,
    ) -> Arc<ResolvedFont> {
        let charset_hash = charset.map(DiskFontCache::charset_hash);
        let memo_key = MemoKey {
            family: family.display_name.to_lowercase(),
            weight: weight.numeric_value(),
            wants_cjk: script_hint.needs_cjk_font(),
            charset: charset_hash.clone(),
        };

        if let Ok(memo) = self.memo.lock() {
            if let Some(hit) = memo.get(&memo_key) {
                return hit.clone();
            }
        }

        let resolved = Arc::new(self.run_chain(family, weight, script_hint, charset_hash.as_deref()));
        if let Ok(mut memo) = self.memo.lock() {
            memo.insert(memo_key, resolved.clone());
        }
        resolved
    }

    fn run_chain(
        &self,
        family: &FontFamilySpec,
        weight: FontWeight,
        script_hint: Script,
        charset_hash: Option<&str>,
    ) -> ResolvedFont {
        log::debug!(
            "resolving font: family='{}', weight={}, script={:?}",
            family.display_name,
            weight.numeric_value(),
            script_hint
        );

        if let Some(font) = self.load_bundled(family, weight, script_hint) {
            return font;
        }

        if script_hint.needs_cjk_font() {
            let key = DiskFontCache::key(&family.display_name, weight.numeric_value(), charset_hash);

            if let Some(bytes) = self.cache.get(&key) {
                log::debug!("  -> disk cache hit");
                return self.make_embedded(bytes, FontOrigin::Cache, family, weight);
            }

            if let Some(bytes) = self.probe_system(script_hint) {
                self.store(&key, &bytes);
                return self.make_embedded(bytes, FontOrigin::System, family, weight);
            }

            if let Some(bytes) = self.fetch_remote(script_hint) {
                self.store(&key, &bytes);
                return self.make_embedded(bytes, FontOrigin::Remote, family, weight);
            }

            log::warn!(
                "no CJK-capable font available for '{}'; degrading to {}",
                family.display_name,
                builtin::BASE_FONT_REGULAR
            );
        }

        ResolvedFont {
            source: FontSource::Builtin {
                base_font: if weight.is_bold() {
                    builtin::BASE_FONT_BOLD
                } else {
                    builtin::BASE_FONT_REGULAR
                },
            },
            origin: FontOrigin::Builtin,
            coverage: Coverage::latin_only(),
        }
    }

    /// Step 1: bundled asset for the requested family and weight.
    fn load_bundled(
        &self,
        family: &FontFamilySpec,
        weight: FontWeight,
        script_hint: Script,
    ) -> Option<ResolvedFont> {
        for dir in &self.asset_dirs {
            let path = dir.join(family.file_for(weight));
            let bytes = match fs::read(&path) {
                Ok(bytes) => bytes,
                Err(_) => continue,
            };
            match validate_candidate(&bytes, script_hint) {
                Ok(()) => {
                    log::debug!("  -> bundled asset {}", path.display());
                    return Some(self.make_embedded(bytes, FontOrigin::Bundled, family, weight));
                }
                Err(reason) => {
                    log::debug!("  -> bundled asset {} rejected: {}", path.display(), reason);
                }
            }
        }
        None
    }

    /// Step 2: pre-installed CJK-capable system font, via fontdb and a
    /// short list of fixed per-OS paths.
    fn probe_system(&self, script_hint: Script) -> Option<Vec<u8>> {
        let db = self.fontdb.get_or_init(|| {
            let mut db = fontdb::Database::new();
            if self.use_system_fonts {
                db.load_system_fonts();
            }
            db
        });

        for name in CJK_SYSTEM_FAMILIES {
            let query = fontdb::Query {
                families: &[fontdb::Family::Name(name)],
                weight: fontdb::Weight::NORMAL,
                stretch: fontdb::Stretch::Normal,
                style: fontdb::Style::Normal,
            };
            let Some(id) = db.query(&query) else { continue };
            let Some(face) = db.face(id) else { continue };
            let bytes = match &face.source {
                fontdb::Source::Binary(data) => data.as_ref().as_ref().to_vec(),
                fontdb::Source::File(path) => match fs::read(path) {
                    Ok(bytes) => bytes,
                    Err(_) => continue,
                },
                _ => continue,
            };
            match validate_candidate(&bytes, script_hint) {
                Ok(()) => {
                    log::debug!("  -> system font '{}'", name);
                    return Some(bytes);
                }
                Err(reason) => log::debug!("  -> system font '{}' rejected: {}", name, reason),
            }
        }

        if self.use_system_fonts {
            for path in CJK_FONT_PATHS {
                let Ok(bytes) = fs::read(path) else { continue };
                match validate_candidate(&bytes, script_hint) {
                    Ok(()) => {
                        log::debug!("  -> system font at {}", path);
                        return Some(bytes);
                    }
                    Err(reason) => log::debug!("  -> {} rejected: {}", path, reason),
                }
            }
        }
        None
    }

    /// Step 3: remote fetch of a CJK font package. Bounded by the fetch
    /// timeout; redirects are followed; any failure just advances the
    /// chain.
    fn fetch_remote(&self, script_hint: Script) -> Option<Vec<u8>> {
        let url = self.remote_url.as_deref()?;
        let client = self
            .http
            .get_or_init(|| {
                reqwest::blocking::Client::builder()
                    .timeout(self.fetch_timeout)
                    .user_agent(concat!("vitae/", env!("CARGO_PKG_VERSION")))
                    .build()
                    .ok()
            })
            .as_ref()?;

        log::info!("fetching CJK font package from {url}");
        let bytes = match client.get(url).send() {
            Ok(response) if response.status().is_success() => match response.bytes() {
                Ok(bytes) => bytes.to_vec(),
                Err(e) => {
                    log::warn!("font fetch body failed: {e}");
                    return None;
                }
            },
            Ok(response) => {
                log::warn!("font fetch returned HTTP {}", response.status());
                return None;
            }
            Err(e) => {
                log::warn!("font fetch failed: {e}");
                return None;
            }
        };

        match validate_candidate(&bytes, script_hint) {
            Ok(()) => Some(bytes),
            Err(reason) => {
                log::warn!("fetched font rejected: {reason}");
                None
            }
        }
    }

    /// Cache writes are best-effort: a failed write still returns the
    /// resolved font, it just will not persist.
    fn store(&self, key: &str, bytes: &[u8]) {
        if let Err(e) = self.cache.put(key, bytes) {
            log::warn!("font cache write failed: {e}");
        }
    }

    fn make_embedded(
        &self,
        data: Vec<u8>,
        origin: FontOrigin,
        family: &FontFamilySpec,
        weight: FontWeight,
    ) -> ResolvedFont {
        let kind = FontProgramKind::sniff(&data).unwrap_or(FontProgramKind::TrueType);
        let coverage = ttf_parser::Face::parse(&data, 0)
            .map(|face| Coverage::of_face(&face))
            .unwrap_or_default();
        let postscript_name = extract_postscript_name(&data).unwrap_or_else(|| {
            format!(
                "{}-{}",
                family.display_name.replace(' ', ""),
                weight.numeric_value()
            )
        });
        ResolvedFont {
            source: FontSource::Embedded {
                data: Arc::new(data),
                postscript_name,
                kind,
            },
            origin,
            coverage,
        }
    }
}

impl Default for FontResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// A candidate program is usable when it is an embeddable sfnt (no
/// collections), parses, and covers the hinted script.
fn validate_candidate(bytes: &[u8], script_hint: Script) -> Result<(), &'static str> {
    if FontProgramKind::sniff(bytes).is_none() {
        return Err("not an embeddable font program");
    }
    let face = ttf_parser::Face::parse(bytes, 0).map_err(|_| "face does not parse")?;
    if !Coverage::of_face(&face).covers(script_hint) {
        return Err("missing glyph coverage for hinted script");
    }
    Ok(())
}
