#![cfg(target_arch = "wasm32")]

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Node};

const STYLE_TAG_SELECTOR: &str = "style[data-epoch-timeline]";

/// Default CSS for the page, including the era theme registry: one
/// `body.era-…` ruleset per theme family, keyed by the classes the theme
/// synchronizer applies.
pub const DEFAULT_STYLES: &str = r#"
:root {
  --epoch-font-family: 'Inter', system-ui, -apple-system, 'Segoe UI', sans-serif;
  --epoch-bg: #111827;
  --epoch-text: #f3f4f6;
  --epoch-muted: #d1d5db;
  --epoch-surface: #1f2937;
  --epoch-surface-text: #f9fafb;
  --epoch-accent: #f87171;
  --epoch-spine: #4b5563;
  --epoch-header-bg: rgba(17, 24, 39, 0.8);
  --epoch-minimap-bg: #1f2937;
  --epoch-image-filter: none;
}

* {
  box-sizing: border-box;
}

body {
  margin: 0;
  min-height: 100vh;
  font-family: var(--epoch-font-family);
  background: var(--epoch-bg);
  color: var(--epoch-text);
  transition: background-color 700ms ease-in-out, color 700ms ease-in-out;
}

/* --- era theme registry ------------------------------------------------- */

/* monochrome plate photography */
body.era-1820s,
body.era-1830s,
body.era-1840s,
body.era-1850s,
body.era-1860s,
body.era-1870s,
body.era-1880s,
body.era-1890s {
  --epoch-bg: #f9f9f9;
  --epoch-text: #222222;
  --epoch-muted: #555555;
  --epoch-surface: #ffffff;
  --epoch-surface-text: #222222;
  --epoch-accent: #444444;
  --epoch-spine: #999999;
  --epoch-header-bg: rgba(249, 249, 249, 0.85);
  --epoch-minimap-bg: #e5e5e5;
  --epoch-image-filter: grayscale(1);
}

/* sepia print era */
body.era-1900s,
body.era-1910s,
body.era-1920s,
body.era-1930s {
  --epoch-font-family: 'EB Garamond', Georgia, serif;
  --epoch-bg: #f4f0e8;
  --epoch-text: #4a3b2a;
  --epoch-muted: #6f5b44;
  --epoch-surface: #fbf8f1;
  --epoch-surface-text: #4a3b2a;
  --epoch-accent: #8b4513;
  --epoch-spine: #b3a184;
  --epoch-header-bg: rgba(244, 240, 232, 0.85);
  --epoch-minimap-bg: #e4dccb;
  --epoch-image-filter: sepia(0.6);
}

/* mid-century modern */
body.era-1940s,
body.era-1950s {
  --epoch-font-family: 'Oswald', 'Inter', sans-serif;
  --epoch-bg: #F3F0E6;
  --epoch-text: #3E3B32;
  --epoch-muted: #8B8C7A;
  --epoch-surface: #ffffff;
  --epoch-surface-text: #3E3B32;
  --epoch-accent: #DDAA33;
  --epoch-spine: #8B8C7A;
  --epoch-header-bg: rgba(243, 240, 230, 0.85);
  --epoch-minimap-bg: #e3dfce;
  --epoch-image-filter: none;
}

/* sixties and seventies */
body.era-1960s,
body.era-1970s {
  --epoch-font-family: 'Paytone One', 'Inter', sans-serif;
  --epoch-bg: #FFF9E5;
  --epoch-text: #4E342E;
  --epoch-muted: #A1887F;
  --epoch-surface: #ffffff;
  --epoch-surface-text: #4E342E;
  --epoch-accent: #F57C00;
  --epoch-spine: #A1887F;
  --epoch-header-bg: rgba(255, 249, 229, 0.85);
  --epoch-minimap-bg: #f2e9ce;
  --epoch-image-filter: saturate(1.3);
}

/* terminal green */
body.era-1980s,
body.era-1990s,
body.era-2000s {
  --epoch-font-family: 'VT323', 'Courier New', monospace;
  --epoch-bg: #000000;
  --epoch-text: #00FF00;
  --epoch-muted: #00aa00;
  --epoch-surface: #041004;
  --epoch-surface-text: #00FF00;
  --epoch-accent: #00FF00;
  --epoch-spine: #005500;
  --epoch-header-bg: rgba(0, 0, 0, 0.85);
  --epoch-minimap-bg: #041004;
  --epoch-image-filter: contrast(1.1);
}

/* --- chrome ------------------------------------------------------------- */

.site-header {
  position: sticky;
  top: 0;
  z-index: 50;
  width: 100%;
  background: var(--epoch-header-bg);
  backdrop-filter: blur(8px);
  box-shadow: 0 8px 24px rgba(0, 0, 0, 0.25);
}

.header-inner {
  margin: 0 auto;
  max-width: 72rem;
  padding: 16px;
}

.header-inner h1 {
  margin: 0;
  font-size: 1.9rem;
}

.header-inner p {
  margin: 2px 0 0;
  color: var(--epoch-muted);
}

.epoch-minimap {
  position: sticky;
  top: 72px;
  z-index: 40;
  height: 40px;
  width: 100%;
  background: var(--epoch-minimap-bg);
  box-shadow: 0 4px 12px rgba(0, 0, 0, 0.2);
  transition: background-color 700ms ease-in-out;
}

.minimap-track {
  position: relative;
  margin: 0 auto;
  max-width: 72rem;
  height: 100%;
  padding: 0 16px;
  display: flex;
  align-items: center;
  justify-content: space-between;
}

.minimap-era {
  font-size: 0.72rem;
  letter-spacing: 0.1em;
  text-transform: uppercase;
  color: var(--epoch-muted);
}

.minimap-puck {
  position: absolute;
  top: 50%;
  transform: translateY(-50%);
  width: 10px;
  height: 10px;
  border-radius: 50%;
  background: var(--epoch-accent);
  box-shadow: 0 0 8px var(--epoch-accent);
}

/* --- timeline ----------------------------------------------------------- */

.timeline-main {
  margin: 0 auto;
  max-width: 72rem;
  padding: 16px;
}

.hero {
  min-height: 55vh;
  display: flex;
  flex-direction: column;
  align-items: center;
  justify-content: center;
  text-align: center;
  gap: 10px;
}

.hero-eyebrow {
  margin: 0;
  font-size: 0.8rem;
  letter-spacing: 0.16em;
  text-transform: uppercase;
  color: var(--epoch-accent);
}

.hero h2 {
  margin: 0;
  font-size: 2.2rem;
}

.hero-lede {
  margin: 0;
  max-width: 38rem;
  color: var(--epoch-muted);
  line-height: 1.6;
}

.timeline {
  position: relative;
  width: 100%;
}

.timeline-spine {
  position: absolute;
  left: 50%;
  top: 0;
  height: 100%;
  width: 2px;
  margin-left: -1px;
  background: var(--epoch-spine);
  transition: background-color 700ms ease-in-out;
}

.era-group {
  display: flex;
  flex-direction: column;
  gap: 48px;
  padding: 48px 0;
}

.event-row {
  position: relative;
  display: flex;
  width: 100%;
}

.event-row.is-left {
  justify-content: flex-start;
}

.event-row.is-right {
  justify-content: flex-end;
}

.event-card {
  position: relative;
  width: 50%;
  border-radius: 12px;
  background: var(--epoch-surface);
  color: var(--epoch-surface-text);
  box-shadow: 0 20px 40px rgba(0, 0, 0, 0.25);
  transition: transform 300ms ease, box-shadow 300ms ease,
    background-color 700ms ease-in-out, color 700ms ease-in-out;
}

.event-card:hover {
  transform: scale(1.03);
  box-shadow: 0 28px 56px rgba(0, 0, 0, 0.3);
}

.event-row.is-left .event-card {
  margin-right: 32px;
}

.event-row.is-right .event-card {
  margin-left: 32px;
}

.event-arrow {
  position: absolute;
  top: 50%;
  width: 16px;
  height: 16px;
  margin-top: -8px;
  transform: rotate(45deg);
  background: var(--epoch-surface);
  transition: background-color 700ms ease-in-out;
}

.event-row.is-left .event-arrow {
  right: -8px;
}

.event-row.is-right .event-arrow {
  left: -8px;
}

.event-image {
  display: block;
  width: 100%;
  height: 192px;
  object-fit: cover;
  border-radius: 12px 12px 0 0;
  filter: var(--epoch-image-filter);
  transition: filter 700ms ease-in-out;
}

.event-body {
  padding: 16px;
}

.event-year {
  font-size: 0.85rem;
  font-weight: 600;
  color: var(--epoch-accent);
  font-variant-numeric: tabular-nums;
}

.event-title {
  margin: 4px 0 0;
  font-size: 1.25rem;
}

.event-description {
  margin: 6px 0 0;
  color: var(--epoch-muted);
  line-height: 1.5;
}

/* --- scroll-to-top ------------------------------------------------------ */

.scroll-top {
  position: fixed;
  bottom: 24px;
  right: 24px;
  z-index: 50;
  width: 48px;
  height: 48px;
  border: none;
  border-radius: 50%;
  background: var(--epoch-accent);
  color: var(--epoch-bg);
  cursor: pointer;
  opacity: 0;
  pointer-events: none;
  box-shadow: 0 12px 24px rgba(0, 0, 0, 0.3);
  transition: opacity 300ms ease;
}

.scroll-top.is-visible {
  opacity: 1;
  pointer-events: auto;
}

.scroll-top svg {
  width: 24px;
  height: 24px;
  margin: 0 auto;
  display: block;
}

/* --- loading and error states ------------------------------------------- */

.status-screen {
  min-height: 100vh;
  display: flex;
  align-items: center;
  justify-content: center;
}

.loading-pulse {
  font-size: 1.8rem;
  color: var(--epoch-muted);
  animation: epoch-pulse 1.6s ease-in-out infinite;
}

@keyframes epoch-pulse {
  0%, 100% { opacity: 1; }
  50% { opacity: 0.35; }
}

.error-card {
  background: #ffffff;
  color: #1f2937;
  border-radius: 12px;
  padding: 32px;
  max-width: 28rem;
  box-shadow: 0 24px 48px rgba(0, 0, 0, 0.35);
}

.error-card h1 {
  margin: 0;
  color: #991b1b;
}

.error-card p {
  margin: 10px 0 0;
}

.error-hint {
  color: #6b7280;
  font-size: 0.9rem;
}

@media (max-width: 720px) {
  .event-card {
    width: 100%;
  }

  .event-row.is-left .event-card,
  .event-row.is-right .event-card {
    margin: 0;
  }

  .event-arrow {
    display: none;
  }

  .timeline-spine {
    display: none;
  }

  .minimap-era {
    display: none;
  }
}
"#;

pub fn ensure_styles(document: &Document) -> Result<(), JsValue> {
    if document.query_selector(STYLE_TAG_SELECTOR)?.is_some() {
        return Ok(());
    }

    let head = document
        .head()
        .ok_or_else(|| JsValue::from_str("document has no <head>"))?;

    let style_el = document.create_element("style")?;
    style_el.set_attribute("data-epoch-timeline", "v1")?;
    style_el.set_text_content(Some(DEFAULT_STYLES));
    head.append_child(&style_el.clone().dyn_into::<Node>()?)?;

    Ok(())
}
