use mission_line::{Candidate, Highlight, HighlightTarget, Hover, MissionDescription, ParseReport, Token, TokenKind};

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const DIM: &str = "\x1b[2m";
    pub const BOLD: &str = "\x1b[1m";

    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";

    pub struct Palette {
        enabled: bool,
    }

    impl Palette {
        pub fn new(enabled: bool) -> Self {
            Self { enabled }
        }

        pub fn paint(&self, s: impl AsRef<str>, color: &str) -> String {
            if self.enabled { format!("{}{}{}", color, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn bold(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", BOLD, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }

        pub fn dim(&self, s: impl AsRef<str>) -> String {
            if self.enabled { format!("{}{}{}", DIM, s.as_ref(), RESET) } else { s.as_ref().to_string() }
        }
    }
}

pub fn print_parse(report: &ParseReport, color: bool) {
    let palette = ansi::Palette::new(color);
    println!("\n{}", palette.bold(palette.paint(format!("⚙  Parsing: \"{}\"", report.text), ansi::CYAN)));

    println!("\n{}", palette.paint("━━━ Tokens ━━━", ansi::GRAY));
    if report.tokens.is_empty() {
        println!("{}", palette.dim("  No tokens produced"));
    }
    for token in &report.tokens {
        println!("  {}", fmt_token(&report.text, token, &palette));
    }
    if !report.covered {
        println!("  {}", palette.paint("✗ scan did not reach the end of the text", ansi::RED));
    }

    match &report.result {
        Ok(mission) => {
            println!("\n{}", palette.paint("━━━ Mission ━━━", ansi::GRAY));
            print_mission(mission, &palette);
        }
        Err(diagnostics) => {
            println!("\n{}", palette.paint("━━━ Diagnostics ━━━", ansi::GRAY));
            for diagnostic in diagnostics.iter() {
                println!("  {} {}", palette.paint("✗", ansi::RED), diagnostic);
            }
        }
    }

    println!("\n{}", palette.paint("━━━ Timing ━━━", ansi::GRAY));
    println!("  Total: {}", palette.paint(format!("{:?}", report.elapsed), ansi::GREEN));
    println!();
}

fn print_mission(mission: &MissionDescription, palette: &ansi::Palette) {
    let row = |label: &str, value: String| println!("  {} {}", palette.dim(format!("{label:<12}")), value);

    row("name:", palette.bold(mission.display_name()));
    row("time:", palette.paint(format!("{}s", mission.time_limit_seconds), ansi::GREEN));
    row("strikes:", palette.paint(mission.strike_limit.to_string(), ansi::GREEN));
    row("pacing:", mission.pacing_enabled.to_string());
    row("front only:", mission.front_face_only.to_string());
    if let Some(widgets) = mission.widget_count {
        row("widgets:", widgets.to_string());
    }
    if let Some(delay) = mission.needy_activation_delay {
        row("needy delay:", format!("{delay}s"));
    }
    if let Some(mode) = mission.factory_mode {
        row("factory:", mode.display_name.to_string());
    }

    for (idx, pool) in mission.pools.iter().enumerate() {
        let contents = match pool.special_kind {
            Some(kind) => format!("{kind:?} {:?}", pool.allowed_sources),
            None => pool.explicit_identifiers.iter().cloned().collect::<Vec<_>>().join(", "),
        };
        println!(
            "  {} {} {} {}",
            palette.paint(format!("[{idx}]"), ansi::GRAY),
            palette.paint(format!("{}×", pool.count), ansi::YELLOW),
            palette.dim("│"),
            palette.paint(contents, ansi::BLUE),
        );
    }
    println!("\n  {} {}", palette.dim("canonical:"), palette.paint(mission.to_canonical(), ansi::CYAN));
}

pub fn print_candidates(text: &str, cursor: usize, candidates: &[Candidate], color: bool) {
    let palette = ansi::Palette::new(color);
    println!(
        "{} {}",
        palette.dim(format!("cursor {cursor}:")),
        palette.paint(format!("\"{}\"", text.get(..cursor).unwrap_or(text)), ansi::CYAN)
    );
    if candidates.is_empty() {
        println!("{}", palette.dim("  No candidates"));
        return;
    }

    for (idx, candidate) in candidates.iter().enumerate() {
        let highlight = candidate.highlight;
        let (id, label) = match highlight.target {
            HighlightTarget::Id => (emphasize(&candidate.replacement_id, highlight, &palette), candidate.label.clone()),
            HighlightTarget::Label => {
                (candidate.replacement_id.clone(), emphasize(&candidate.label, highlight, &palette))
            }
        };
        let marker =
            if candidate.selectable { palette.paint(format!("[{idx}]"), ansi::GRAY) } else { palette.dim(" · ") };
        if id.is_empty() {
            println!("  {marker} {label}");
        } else {
            println!("  {marker} {id} {} {label}", palette.dim("│"));
        }
    }
}

pub fn print_hover(hover: Option<&Hover>, color: bool) {
    let palette = ansi::Palette::new(color);
    let Some(hover) = hover else {
        println!("{}", palette.dim("No identifier here"));
        return;
    };
    println!(
        "{} {} {}",
        palette.bold(&hover.id),
        palette.dim("│"),
        palette.paint(hover.display_name.as_deref().unwrap_or("(unknown)"), ansi::BLUE),
    );
    println!("  {}", palette.paint(format!("span {}..{}", hover.span.start, hover.span.end()), ansi::YELLOW));
}

fn emphasize(s: &str, highlight: Highlight, palette: &ansi::Palette) -> String {
    let end = (highlight.start + highlight.len).min(s.len());
    match (s.get(..highlight.start), s.get(highlight.start..end), s.get(end..)) {
        (Some(head), Some(mid), Some(tail)) => format!("{head}{}{tail}", palette.bold(palette.paint(mid, ansi::GREEN))),
        _ => s.to_string(),
    }
}

fn fmt_token(text: &str, token: &Token, palette: &ansi::Palette) -> String {
    let kind = match &token.kind {
        TokenKind::Time(_) => "time",
        TokenKind::StrikeLimit(_) => "strikes",
        TokenKind::Setting(_) => "setting",
        TokenKind::Pool(_) => "pool",
    };
    format!(
        "{} {} {}",
        palette.paint(format!("{}..{}", token.span.start, token.span.end()), ansi::YELLOW),
        palette.paint(format!("{kind:<8}"), ansi::BLUE),
        palette.dim(text.get(token.span.start..token.span.end()).unwrap_or("")),
    )
}
