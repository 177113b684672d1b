use hyprbars_config::WindowRuleConfig;
use hyprbars_core::{Rect, WindowId};
use hyprbars_theme::Color;

/// What the engine needs to know about a host window.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowInfo {
    pub id:       WindowId,
    /// Content area in layout space; the bar is drawn above it.
    pub geometry: Rect,
    pub title:    String,
    pub class:    String,
    pub active:   bool,
    pub fullscreen: bool,
    /// `false` for clients that asked for no server-side decorations.
    pub wants_decoration: bool,
}

impl WindowInfo {
    pub fn new(id: WindowId, geometry: Rect) -> Self {
        Self {
            id,
            geometry,
            title: String::new(),
            class: String::new(),
            active: false,
            fullscreen: false,
            wants_decoration: true,
        }
    }
}

/// Per-window overrides resolved from the configured rules.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WindowRules {
    /// Keep the decoration but draw nothing and take no input.
    pub hidden:      bool,
    pub bar_color:   Option<Color>,
    pub title_color: Option<Color>,
}

/// A compiled `[[window_rule]]` entry.
#[derive(Debug, Clone)]
pub struct WindowRule {
    pub class: String,
    pub rules: WindowRules,
}

impl WindowRule {
    pub fn compile(cfg: &WindowRuleConfig) -> Self {
        let color = |key: &str, raw: &Option<String>| {
            let raw = raw.as_deref()?;
            let parsed = Color::parse(raw);
            if parsed.is_none() {
                tracing::warn!(class = %cfg.class, "window rule: invalid {key} '{raw}'; ignored");
            }
            parsed
        };

        Self {
            class: cfg.class.clone(),
            rules: WindowRules {
                hidden:      cfg.no_bar,
                bar_color:   color("bar_color", &cfg.bar_color),
                title_color: color("title_color", &cfg.title_color),
            },
        }
    }

    /// Merge every rule whose class matches exactly.  Later rules override
    /// earlier colours; any matching `no_bar` hides the bar.
    pub fn resolve(rules: &[WindowRule], class: &str) -> WindowRules {
        rules
            .iter()
            .filter(|r| r.class == class)
            .fold(WindowRules::default(), |mut acc, r| {
                acc.hidden |= r.rules.hidden;
                acc.bar_color = r.rules.bar_color.or(acc.bar_color);
                acc.title_color = r.rules.title_color.or(acc.title_color);
                acc
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(class: &str, no_bar: bool, bar_color: Option<&str>) -> WindowRule {
        WindowRule::compile(&WindowRuleConfig {
            class: class.into(),
            no_bar,
            bar_color: bar_color.map(Into::into),
            title_color: None,
        })
    }

    #[test]
    fn only_exact_class_matches() {
        let rules = [rule("firefox", true, None)];
        assert!(WindowRule::resolve(&rules, "firefox").hidden);
        assert!(!WindowRule::resolve(&rules, "firefox-esr").hidden);
        assert_eq!(WindowRule::resolve(&rules, "kitty"), WindowRules::default());
    }

    #[test]
    fn later_colours_win_and_hidden_sticks() {
        let rules = [
            rule("kitty", true, Some("rgb(ffffff)")),
            rule("kitty", false, Some("rgb(000000)")),
            rule("kitty", false, Some("not-a-colour")),
        ];
        let resolved = WindowRule::resolve(&rules, "kitty");
        assert!(resolved.hidden);
        assert_eq!(resolved.bar_color, Some(Color::BLACK));
    }
}
