use log::{Level, LevelFilter, Log, Metadata, Record};
use songbook::{library, timing, Config, SongError, SongLibrary};
use std::env;
use std::process;

const USAGE: &str = "Usage: songbook info <file.song>
       songbook timeline <file.song> [sample-rate]
       songbook list [songs-dir]
       songbook check <file.song>";

/// Plain stderr logger; level from SONGBOOK_LOG (error, warn, info, debug, trace).
struct StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

static LOGGER: StderrLogger = StderrLogger;

fn init_logging() {
    let level = env::var("SONGBOOK_LOG")
        .ok()
        .and_then(|s| s.parse::<Level>().ok())
        .map_or(LevelFilter::Warn, |l| l.to_level_filter());
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

/// Configuration from the file named by SONGBOOK_CONFIG, or the defaults.
fn load_config() -> Result<Config, SongError> {
    match env::var("SONGBOOK_CONFIG") {
        Ok(path) => Config::load(path),
        Err(_) => Ok(Config::default()),
    }
}

fn usage_exit() -> ! {
    eprintln!("{}", USAGE);
    process::exit(1);
}

fn run(args: &[String]) -> Result<(), SongError> {
    let config = load_config()?;

    match args.first().map(String::as_str) {
        Some("info") => {
            let path = args.get(1).unwrap_or_else(|| usage_exit());
            let score = library::load_file(path)?;
            let timeline = timing::score_to_timeline_at(&score, config.sample_rate);

            println!("Name:           {}", score.name());
            println!("Kind:           {:?}", score.kind());
            println!("Tempo:          {} BPM", score.bpm());
            println!("Time signature: {}", score.time_signature());
            println!(
                "Notes:          {} ({} melody, {} percussion)",
                score.note_count(),
                score.melody_count(),
                score.percussion_count()
            );
            if let (Ok(low), Ok(high)) = (score.lowest_pitch(), score.highest_pitch()) {
                println!("Range:          {} - {}", low, high);
            }
            println!("Length:         {:.2}s", timeline.duration_seconds());
        }
        Some("timeline") => {
            let path = args.get(1).unwrap_or_else(|| usage_exit());
            let sample_rate = match args.get(2) {
                Some(rate) => rate.parse().unwrap_or_else(|_| {
                    eprintln!("Invalid sample rate '{}'", rate);
                    process::exit(1);
                }),
                None => config.sample_rate,
            };

            let score = library::load_file(path)?;
            let timeline = timing::score_to_timeline_at(&score, sample_rate);
            let yaml = serde_yaml::to_string(&timeline)
                .map_err(|e| SongError::InvalidState(format!("cannot serialize timeline: {}", e)))?;
            print!("{}", yaml);
        }
        Some("list") => {
            let library = match args.get(1) {
                Some(dir) => SongLibrary::new(dir),
                None => SongLibrary::from_config(&config),
            };
            for entry in library.list()? {
                println!("{:<10} {}", format!("{:?}", entry.kind), entry.name);
            }
        }
        Some("check") => {
            let path = args.get(1).unwrap_or_else(|| usage_exit());
            let score = library::load_file(path)?;
            let reencoded = songbook::encode(&score);
            if songbook::decode(&reencoded)? != score {
                eprintln!("'{}' does not survive a round trip", path);
                process::exit(1);
            }
            println!("OK: '{}' ({} notes)", score.name(), score.note_count());
        }
        _ => usage_exit(),
    }

    Ok(())
}

fn main() {
    init_logging();

    let args: Vec<String> = env::args().skip(1).collect();
    if let Err(e) = run(&args) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
