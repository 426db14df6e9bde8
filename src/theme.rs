use crate::storage;
use crate::types::ThemeMode;

pub struct ThemeDefinition {
    pub css: &'static str,
}

pub fn theme_definition(mode: ThemeMode) -> ThemeDefinition {
    match mode {
        ThemeMode::Light => ThemeDefinition { css: LIGHT_THEME },
        ThemeMode::Dark => ThemeDefinition { css: DARK_THEME },
    }
}

const THEME_KEY: &str = "doit_theme";

pub fn load_theme_mode() -> ThemeMode {
    match storage::get(THEME_KEY).as_deref() {
        Some("dark") => ThemeMode::Dark,
        _ => ThemeMode::Light,
    }
}

pub fn save_theme_mode(mode: ThemeMode) {
    let value = match mode {
        ThemeMode::Light => "light",
        ThemeMode::Dark => "dark",
    };
    if let Err(err) = storage::set(THEME_KEY, value) {
        tracing::warn!("failed to persist theme selection: {err}");
    }
}

const LIGHT_THEME: &str = r#"
:root {
    --color-bg-page: #eff4fb;
    --color-header-bg: rgba(255, 255, 255, 0.85);
    --color-surface: #ffffff;
    --color-surface-muted: #f3f4f6;
    --color-border: #e5e7eb;
    --color-text-primary: #111827;
    --color-text-secondary: #374151;
    --color-text-muted: #6b7280;
    --color-input-border: #d1d5db;
    --color-input-bg: #ffffff;
    --color-accent: #2563eb;
    --color-accent-strong: #1d4ed8;
    --color-accent-soft: #eff6ff;
    --color-accent-contrast: #ffffff;
    --color-danger: #dc2626;
    --color-danger-soft: #fef2f2;
    --color-success: #16a34a;
    --color-success-soft: #f0fdf4;
    --color-warning: #d97706;
    --color-warning-soft: #fffbeb;
    --color-chat-user-bg: #2563eb;
    --color-chat-user-text: #ffffff;
    --color-chat-assistant-bg: #f9fafb;
    --color-chat-assistant-text: #111827;
    --color-timestamp: #9ca3af;
    --color-shimmer-base: rgba(37, 99, 235, 0.25);
    --color-shimmer-highlight: #2563eb;
}
body { background: var(--color-bg-page); color: var(--color-text-primary); }
"#;

const DARK_THEME: &str = r#"
:root {
    --color-bg-page: #0b1120;
    --color-header-bg: rgba(15, 23, 42, 0.85);
    --color-surface: #111a2e;
    --color-surface-muted: #1e293b;
    --color-border: #28344b;
    --color-text-primary: #f1f5f9;
    --color-text-secondary: #cbd5e1;
    --color-text-muted: #94a3b8;
    --color-input-border: #334155;
    --color-input-bg: #0f172a;
    --color-accent: #3b82f6;
    --color-accent-strong: #2563eb;
    --color-accent-soft: rgba(59, 130, 246, 0.15);
    --color-accent-contrast: #ffffff;
    --color-danger: #f87171;
    --color-danger-soft: rgba(248, 113, 113, 0.12);
    --color-success: #4ade80;
    --color-success-soft: rgba(74, 222, 128, 0.12);
    --color-warning: #fbbf24;
    --color-warning-soft: rgba(251, 191, 36, 0.12);
    --color-chat-user-bg: #3b82f6;
    --color-chat-user-text: #ffffff;
    --color-chat-assistant-bg: #1e293b;
    --color-chat-assistant-text: #f1f5f9;
    --color-timestamp: #64748b;
    --color-shimmer-base: rgba(59, 130, 246, 0.25);
    --color-shimmer-highlight: #3b82f6;
}
body { background: var(--color-bg-page); color: var(--color-text-primary); }
"#;
