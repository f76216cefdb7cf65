use std::path::{Path, PathBuf};

use bazi_base::{
    ALL_POSITIONS, AnalysisConfig, Branch, FourPillars, Gender, Pillar, Stem,
    compute_decade_cycle, compute_element_profile, compute_four_pillars, compute_pattern,
    compute_ten_gods,
};
use bazi_report::{PhraseBook, ReportRequest, assemble_report};
use bazi_time::{CivilDate, CivilDateTime, ClockTime, UtcOffset};
use chrono::Datelike;
use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "bazi", about = "Four Pillars (BaZi) CLI")]
struct Cli {
    /// Analysis config (TOML); defaults apply when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct BirthArgs {
    /// Local birth date (YYYY-MM-DD)
    #[arg(long)]
    date: String,
    /// Local birth time (hh:mm)
    #[arg(long, default_value = "00:00")]
    time: String,
    /// UTC offset in hours (quarter-hour multiples, e.g. 8, -3.5, +05:45)
    #[arg(long, default_value = "8", allow_hyphen_values = true)]
    offset: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Four pillars with Nayin and hidden stems
    Pillars {
        #[command(flatten)]
        birth: BirthArgs,
    },
    /// Five-elements strength profile
    Elements {
        #[command(flatten)]
        birth: BirthArgs,
    },
    /// Ten-Gods labels relative to the day master
    TenGods {
        #[command(flatten)]
        birth: BirthArgs,
        /// male or female
        #[arg(long, default_value = "male")]
        gender: String,
    },
    /// Structural pattern of the chart
    Pattern {
        #[command(flatten)]
        birth: BirthArgs,
    },
    /// Nayin of a stem-branch pair; the full table when no pair is given
    Nayin {
        /// Stem (hanzi or pinyin)
        stem: Option<String>,
        /// Branch (hanzi or pinyin)
        branch: Option<String>,
    },
    /// Decade cycle (大运)
    Decades {
        #[command(flatten)]
        birth: BirthArgs,
        /// male or female
        #[arg(long, default_value = "male")]
        gender: String,
        /// Current date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        today: Option<String>,
    },
    /// Full analysis report
    Report {
        #[command(flatten)]
        birth: BirthArgs,
        /// male or female
        #[arg(long, default_value = "male")]
        gender: String,
        /// Subject name used in the narrative
        #[arg(long, default_value = "friend")]
        name: String,
        /// Seed for phrase selection (random when omitted)
        #[arg(long)]
        seed: Option<u64>,
        /// Current date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        today: Option<String>,
        /// Phrase book (JSON) replacing the built-in phrases
        #[arg(long)]
        phrases: Option<PathBuf>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = load_config(cli.config.as_deref());

    match cli.command {
        Commands::Pillars { birth } => {
            let moment = require_birth(&birth);
            let pillars = require_pillars(&moment, &config);
            println!("{moment}");
            for position in ALL_POSITIONS {
                let p = pillars.get(position);
                println!(
                    "{:<6} {}  {} ({})  hidden: {}  [{}]",
                    position.name(),
                    p,
                    p.nayin().name,
                    p.nayin().gloss,
                    join_stems(p.hidden_stems()),
                    position.role()
                );
            }
            let dm = pillars.day_master();
            println!(
                "Day master: {} ({} {})",
                dm,
                dm.polarity().name(),
                dm.element().name()
            );
        }

        Commands::Elements { birth } => {
            let moment = require_birth(&birth);
            let pillars = require_pillars(&moment, &config);
            let profile = compute_element_profile(&pillars, &config);
            println!("{pillars}");
            for e in profile.entries() {
                println!(
                    "{:<6} {} {:>6.2}%  {}",
                    e.element.name(),
                    e.element.hanzi(),
                    e.strength,
                    e.tier.name()
                );
            }
            println!(
                "Strongest: {}  Weakest: {}",
                profile.strongest().name(),
                profile.weakest().name()
            );
        }

        Commands::TenGods { birth, gender } => {
            let moment = require_birth(&birth);
            let gender = require_gender(&gender);
            let pillars = require_pillars(&moment, &config);
            let gods = compute_ten_gods(&pillars, pillars.day_master(), gender, config.tie_break);
            println!("{pillars}  (day master {})", gods.day_master);
            for l in &gods.labels {
                println!(
                    "{:<6} {}  {}",
                    l.position.name(),
                    pillars.get(l.position).stem(),
                    l.label
                );
            }
            for listed in gods.categories.iter().filter(|c| !c.gods.is_empty()) {
                let names: Vec<&str> = listed.gods.iter().map(|g| g.hanzi()).collect();
                println!("{:?}: {}", listed.category, names.join(" "));
            }
            println!("Hidden stems:");
            for h in &gods.hidden {
                println!("  {:<6} {} {}", h.position.name(), h.stem, h.god);
            }
        }

        Commands::Pattern { birth } => {
            let moment = require_birth(&birth);
            let pillars = require_pillars(&moment, &config);
            let pattern = compute_pattern(&pillars, pillars.day_master());
            println!(
                "{} ({:?}, {:?}): {}",
                pattern.kind, pattern.strength, pattern.quality, pattern.description
            );
        }

        Commands::Nayin { stem, branch } => match (stem, branch) {
            (None, None) => {
                for n in 0..60 {
                    let p = Pillar::from_cycle_index(n);
                    println!("{:>2} {} {} ({})", n, p, p.nayin().name, p.nayin().gloss);
                }
            }
            (Some(stem), Some(branch)) => {
                let p = Pillar::new(require_stem(&stem), require_branch(&branch))
                    .unwrap_or_else(|e| {
                        eprintln!("{e}");
                        std::process::exit(1);
                    });
                println!(
                    "{} #{}: {} ({}, {})",
                    p,
                    p.cycle_index(),
                    p.nayin().name,
                    p.nayin().gloss,
                    p.nayin().element.name()
                );
            }
            _ => {
                eprintln!("Give both a stem and a branch, or neither for the full table");
                std::process::exit(1);
            }
        },

        Commands::Decades {
            birth,
            gender,
            today,
        } => {
            let moment = require_birth(&birth);
            let gender = require_gender(&gender);
            let today = require_today(today.as_deref());
            let pillars = require_pillars(&moment, &config);
            let cycle = compute_decade_cycle(&moment, &pillars, gender, config.decade_count);
            println!(
                "{} ({}), starting at {} years {} months",
                pillars,
                cycle.direction.name(),
                cycle.start_age_years,
                cycle.start_age_months
            );
            let current = cycle.current(today).map(|d| d.ordinal);
            for d in &cycle.pillars {
                let marker = if Some(d.ordinal) == current { " *" } else { "" };
                println!(
                    "{:>2}. {}  age {:>3}  from {}{}",
                    d.ordinal, d.pillar, d.start_age, d.start, marker
                );
            }
        }

        Commands::Report {
            birth,
            gender,
            name,
            seed,
            today,
            phrases,
            json,
        } => {
            let request = ReportRequest {
                name,
                birth: require_birth(&birth),
                gender: require_gender(&gender),
                today: require_today(today.as_deref()),
                config,
            };
            let book = phrases.map_or_else(PhraseBook::default, |p| load_phrases(&p));
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_os_rng(),
            };
            let result = assemble_report(request, &book, &mut rng).unwrap_or_else(|e| {
                eprintln!("Report failed: {e}");
                std::process::exit(1);
            });
            if json {
                let text = result.to_json().unwrap_or_else(|e| {
                    eprintln!("{e}");
                    std::process::exit(1);
                });
                println!("{text}");
            } else {
                print_report(&result);
            }
        }
    }
}

fn print_report(r: &bazi_report::AnalysisResult) {
    println!("{}", r.narrative.opening);
    println!();
    println!("{}  (age {}, {})", r.pillars, r.age, r.gender.name());
    println!("{}", r.narrative.explanation);
    println!();
    for e in r.elements.entries() {
        println!("  {:<6} {:>6.2}%  {}", e.element.name(), e.strength, e.tier.name());
    }
    println!(
        "Ten Gods: year {}  month {}  day self  hour {}",
        r.ten_gods.year, r.ten_gods.month, r.ten_gods.hour
    );
    println!("Pattern: {}  {}", r.pattern.kind, r.pattern.description);
    match r.current.decade {
        Some(d) => println!(
            "Current: year {}  month {}  decade {} (from age {})",
            r.current.year, r.current.month, d.pillar, d.start_age
        ),
        None => println!(
            "Current: year {}  month {}  (decade cycle starts at {})",
            r.current.year, r.current.month, r.decades.start_age_years
        ),
    }
    println!("Next year: {}", r.current.next_year);
    println!();
    for remark in &r.narrative.remarks {
        println!("{}", remark.text);
    }
    println!("{}", r.narrative.closing);
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(path: Option<&Path>) -> AnalysisConfig {
    let Some(path) = path else {
        return AnalysisConfig::default();
    };
    let text = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Failed to read config {}: {e}", path.display());
        std::process::exit(1);
    });
    let config: AnalysisConfig = toml::from_str(&text).unwrap_or_else(|e| {
        eprintln!("Failed to parse config {}: {e}", path.display());
        std::process::exit(1);
    });
    if let Err(e) = config.validate() {
        eprintln!("{e}");
        std::process::exit(1);
    }
    debug!(path = %path.display(), "loaded config");
    config
}

fn load_phrases(path: &Path) -> PhraseBook {
    let text = std::fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Failed to read phrase book {}: {e}", path.display());
        std::process::exit(1);
    });
    PhraseBook::from_json(&text).unwrap_or_else(|e| {
        eprintln!("Failed to parse phrase book {}: {e}", path.display());
        std::process::exit(1);
    })
}

fn require_birth(args: &BirthArgs) -> CivilDateTime {
    let date = require_date(&args.date);
    let time: ClockTime = args.time.parse().unwrap_or_else(|e| {
        eprintln!("Invalid time: {e}");
        std::process::exit(1);
    });
    let offset: UtcOffset = args.offset.parse().unwrap_or_else(|e| {
        eprintln!("Invalid offset: {e}");
        std::process::exit(1);
    });
    CivilDateTime::new(date, time, offset)
}

fn require_date(s: &str) -> CivilDate {
    s.parse().unwrap_or_else(|e| {
        eprintln!("Invalid date: {e}");
        std::process::exit(1);
    })
}

fn require_today(s: Option<&str>) -> CivilDate {
    match s {
        Some(s) => require_date(s),
        None => {
            let now = chrono::Local::now().date_naive();
            CivilDate::new(now.year(), now.month(), now.day()).unwrap_or_else(|e| {
                eprintln!("Invalid system date: {e}");
                std::process::exit(1);
            })
        }
    }
}

fn require_pillars(moment: &CivilDateTime, config: &AnalysisConfig) -> FourPillars {
    compute_four_pillars(moment, config.late_rat).unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    })
}

fn require_gender(s: &str) -> Gender {
    s.parse().unwrap_or_else(|e| {
        eprintln!("{e}");
        std::process::exit(1);
    })
}

fn require_stem(s: &str) -> Stem {
    Stem::from_name(s).unwrap_or_else(|| {
        eprintln!("Invalid stem: {s}");
        eprintln!("Valid: 甲 乙 丙 丁 戊 己 庚 辛 壬 癸 (or pinyin)");
        std::process::exit(1);
    })
}

fn require_branch(s: &str) -> Branch {
    Branch::from_name(s).unwrap_or_else(|| {
        eprintln!("Invalid branch: {s}");
        eprintln!("Valid: 子 丑 寅 卯 辰 巳 午 未 申 酉 戌 亥 (or pinyin)");
        std::process::exit(1);
    })
}

fn join_stems(stems: &[Stem]) -> String {
    stems.iter().map(|s| s.hanzi()).collect::<Vec<_>>().join(" ")
}
