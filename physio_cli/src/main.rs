use clap::{Parser, Subcommand};
use physio_core::config::{OutputFormat, MAX_DECIMALS};
use physio_core::numeric::round_to;
use physio_core::{cardiac, curve, renal, respiratory};
use physio_core::{Config, CurvePoint, OrganSystem, PvLoop, RangeTable, Result};
use std::io;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "physio")]
#[command(about = "Physiology formula calculator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Use this config file instead of the default location
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Decimal places for text output
    #[arg(long, global = true, value_parser = decimals_parser())]
    decimals: Option<u32>,
}

#[derive(Subcommand)]
enum Commands {
    /// Glomerular filtration rate (mL/min)
    Gfr {
        /// Glomerular capillary pressure (mmHg)
        #[arg(long, allow_negative_numbers = true)]
        glomerular_pressure: Option<f64>,

        /// Bowman's capsule pressure (mmHg)
        #[arg(long, allow_negative_numbers = true)]
        #[arg(default_value_t = renal::BOWMAN_PRESSURE_MMHG)]
        bowman_pressure: f64,

        /// Plasma oncotic pressure (mmHg)
        #[arg(long, allow_negative_numbers = true)]
        #[arg(default_value_t = renal::ONCOTIC_PRESSURE_MMHG)]
        oncotic_pressure: f64,

        /// Filtration coefficient (mL/min/mmHg)
        #[arg(long, allow_negative_numbers = true)]
        #[arg(default_value_t = renal::FILTRATION_COEFFICIENT)]
        kf: f64,
    },

    /// Medullary interstitial osmolarity at a depth (mOsm/L)
    Osmolarity {
        /// Depth into the medulla (mm)
        #[arg(long, allow_negative_numbers = true)]
        depth: Option<f64>,

        /// Cortical osmolarity (mOsm/L)
        #[arg(long, allow_negative_numbers = true)]
        cortical: Option<f64>,

        /// Total loop length (mm)
        #[arg(long, allow_negative_numbers = true)]
        max_depth: Option<f64>,
    },

    /// Renal blood flow (mL/min)
    Rbf {
        /// Renal arterial pressure (mmHg)
        #[arg(long, allow_negative_numbers = true)]
        arterial_pressure: Option<f64>,

        /// Renal venous pressure (mmHg)
        #[arg(long, allow_negative_numbers = true)]
        #[arg(default_value_t = renal::RENAL_VENOUS_PRESSURE_MMHG)]
        venous_pressure: f64,

        /// Renal vascular resistance (mmHg·min/mL)
        #[arg(long, allow_negative_numbers = true)]
        #[arg(default_value_t = renal::RENAL_RESISTANCE)]
        resistance: f64,
    },

    /// Stroke volume (mL)
    StrokeVolume {
        /// End-diastolic volume (mL)
        #[arg(long, allow_negative_numbers = true)]
        edv: Option<f64>,

        /// Contractility (% of normal)
        #[arg(long, allow_negative_numbers = true)]
        contractility: Option<f64>,

        /// Afterload (mmHg)
        #[arg(long, allow_negative_numbers = true)]
        afterload: Option<f64>,
    },

    /// Cardiac output (L/min)
    CardiacOutput {
        /// Stroke volume (mL)
        #[arg(long, allow_negative_numbers = true)]
        stroke_volume: Option<f64>,

        /// Heart rate (bpm)
        #[arg(long, allow_negative_numbers = true)]
        heart_rate: Option<f64>,
    },

    /// Mean arterial pressure (mmHg)
    Map {
        #[arg(long, allow_negative_numbers = true)]
        systolic: Option<f64>,

        #[arg(long, allow_negative_numbers = true)]
        diastolic: Option<f64>,
    },

    /// Pressure-volume loop vertices
    PvLoop {
        /// End-diastolic volume (mL)
        #[arg(long, allow_negative_numbers = true)]
        edv: Option<f64>,

        /// End-systolic volume (mL)
        #[arg(long, allow_negative_numbers = true)]
        esv: Option<f64>,

        /// End-diastolic pressure (mmHg)
        #[arg(long, allow_negative_numbers = true)]
        #[arg(default_value_t = cardiac::END_DIASTOLIC_PRESSURE_MMHG)]
        edp: f64,

        /// End-systolic pressure (mmHg)
        #[arg(long, allow_negative_numbers = true)]
        #[arg(default_value_t = cardiac::END_SYSTOLIC_PRESSURE_MMHG)]
        esp: f64,

        /// Print the closed polygon instead of the named vertices
        #[arg(long)]
        polygon: bool,
    },

    /// Alveolar oxygen pressure (mmHg)
    Pao2 {
        /// Fraction of inspired oxygen
        #[arg(long, allow_negative_numbers = true)]
        fio2: Option<f64>,

        /// Barometric pressure (mmHg)
        #[arg(long, allow_negative_numbers = true)]
        barometric_pressure: Option<f64>,

        /// Arterial CO2 pressure (mmHg)
        #[arg(long, allow_negative_numbers = true)]
        paco2: Option<f64>,

        /// Respiratory quotient
        #[arg(long, allow_negative_numbers = true)]
        #[arg(default_value_t = respiratory::RESPIRATORY_QUOTIENT)]
        rq: f64,
    },

    /// Minute ventilation (L/min)
    MinuteVentilation {
        /// Tidal volume (mL)
        #[arg(long, allow_negative_numbers = true)]
        tidal_volume: Option<f64>,

        /// Respiratory rate (breaths/min)
        #[arg(long, allow_negative_numbers = true)]
        respiratory_rate: Option<f64>,
    },

    /// Oxyhemoglobin saturation (%)
    O2Sat {
        /// Oxygen partial pressure (mmHg)
        #[arg(long, allow_negative_numbers = true)]
        po2: Option<f64>,
    },

    /// Show parameter ranges (renal, cardiac, respiratory)
    Ranges {
        system: Option<String>,
    },

    /// Sample a curve as CSV
    Curve {
        #[command(subcommand)]
        kind: CurveKind,
    },
}

#[derive(Subcommand)]
enum CurveKind {
    /// Osmolarity against medullary depth
    Osmolarity {
        #[arg(long)]
        cortical: Option<f64>,

        #[arg(long)]
        max_depth: Option<f64>,

        #[arg(long, default_value_t = 15)]
        steps: usize,
    },

    /// Oxyhemoglobin dissociation curve
    O2Saturation {
        #[arg(long)]
        max_po2: Option<f64>,

        #[arg(long, default_value_t = 30)]
        steps: usize,
    },
}

/// Output settings resolved from flags and config
struct Output {
    format: OutputFormat,
    decimals: u32,
}

impl Output {
    fn round(&self, value: f64) -> f64 {
        round_to(value, self.decimals as i32)
    }

    fn scalar(&self, quantity: &str, value: f64, unit: &str) -> Result<()> {
        match self.format {
            OutputFormat::Text => {
                println!("{}: {} {}", quantity, self.round(value), unit);
            }
            OutputFormat::Json => {
                let json = serde_json::json!({
                    "quantity": quantity,
                    "value": value,
                    "unit": unit,
                });
                println!("{}", serde_json::to_string_pretty(&json)?);
            }
        }
        Ok(())
    }
}

/// Fills omitted inputs from the range table
struct Defaults<'a> {
    ranges: &'a RangeTable,
}

impl Defaults<'_> {
    fn or_normal(&self, value: Option<f64>, system: OrganSystem, name: &str) -> Result<f64> {
        match value {
            Some(v) => Ok(v),
            None => Ok(self.ranges.require(system, name)?.normal),
        }
    }

    fn or_max(&self, value: Option<f64>, system: OrganSystem, name: &str) -> Result<f64> {
        match value {
            Some(v) => Ok(v),
            None => Ok(self.ranges.require(system, name)?.max),
        }
    }

    /// Total loop length; the upper bound of the `loop_length` slider
    fn loop_depth(&self, max_depth: Option<f64>) -> Result<f64> {
        self.or_max(max_depth, OrganSystem::Renal, "loop_length")
    }
}

fn decimals_parser() -> clap::builder::RangedI64ValueParser<u32> {
    clap::value_parser!(u32).range(0..=i64::from(MAX_DECIMALS))
}

fn main() -> Result<()> {
    // Initialize logging
    physio_core::logging::init();

    let cli = Cli::parse();

    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let ranges = config.range_table()?;

    let output = Output {
        format: if cli.json {
            OutputFormat::Json
        } else {
            config.display.format
        },
        decimals: cli.decimals.unwrap_or(config.display.decimals),
    };
    tracing::debug!(
        "Output format {:?} with {} decimals, {} range entries",
        output.format,
        output.decimals,
        ranges.len()
    );

    use OrganSystem::{Cardiac, Renal, Respiratory};
    let defaults = Defaults { ranges: &ranges };

    match cli.command {
        Commands::Gfr {
            glomerular_pressure,
            bowman_pressure,
            oncotic_pressure,
            kf,
        } => {
            let pressure = defaults.or_normal(glomerular_pressure, Renal, "glomerular_pressure")?;
            let value = renal::gfr(pressure, bowman_pressure, oncotic_pressure, kf);
            output.scalar("GFR", value, "mL/min")
        }
        Commands::Osmolarity {
            depth,
            cortical,
            max_depth,
        } => {
            let depth = defaults.or_normal(depth, Renal, "loop_length")?;
            let cortical = defaults.or_normal(cortical, Renal, "osmolarity")?;
            let max_depth = defaults.loop_depth(max_depth)?;
            let value = renal::medullary_osmolarity(cortical, depth, max_depth);
            output.scalar("Osmolarity", value, "mOsm/L")
        }
        Commands::Rbf {
            arterial_pressure,
            venous_pressure,
            resistance,
        } => {
            let arterial = defaults.or_normal(arterial_pressure, Renal, "arterial_pressure")?;
            let value = renal::renal_blood_flow(arterial, venous_pressure, resistance);
            output.scalar("RBF", value, "mL/min")
        }
        Commands::StrokeVolume {
            edv,
            contractility,
            afterload,
        } => {
            let edv = defaults.or_normal(edv, Cardiac, "edv")?;
            let contractility = defaults.or_normal(contractility, Cardiac, "contractility")?;
            let afterload = defaults.or_normal(afterload, Cardiac, "afterload")?;
            let value = cardiac::stroke_volume(edv, contractility, afterload);
            output.scalar("Stroke volume", value, "mL")
        }
        Commands::CardiacOutput {
            stroke_volume,
            heart_rate,
        } => {
            let sv = defaults.or_normal(stroke_volume, Cardiac, "stroke_volume")?;
            let hr = defaults.or_normal(heart_rate, Cardiac, "heart_rate")?;
            output.scalar("Cardiac output", cardiac::cardiac_output(sv, hr), "L/min")
        }
        Commands::Map {
            systolic,
            diastolic,
        } => {
            let systolic = defaults.or_normal(systolic, Cardiac, "systolic")?;
            let diastolic = defaults.or_normal(diastolic, Cardiac, "diastolic")?;
            let value = cardiac::mean_arterial_pressure(systolic, diastolic);
            output.scalar("MAP", value, "mmHg")
        }
        Commands::PvLoop {
            edv,
            esv,
            edp,
            esp,
            polygon,
        } => {
            let edv = defaults.or_normal(edv, Cardiac, "edv")?;
            let esv = defaults.or_normal(esv, Cardiac, "esv")?;
            let pv = cardiac::pv_loop(edv, esv, edp, esp);
            print_pv_loop(&pv, polygon, &output)
        }
        Commands::Pao2 {
            fio2,
            barometric_pressure,
            paco2,
            rq,
        } => {
            let fio2 = defaults.or_normal(fio2, Respiratory, "fio2")?;
            let pb = defaults.or_normal(barometric_pressure, Respiratory, "barometric_pressure")?;
            let paco2 = defaults.or_normal(paco2, Respiratory, "paco2")?;
            let value = respiratory::alveolar_o2(fio2, pb, paco2, rq);
            output.scalar("PAO2", value, "mmHg")
        }
        Commands::MinuteVentilation {
            tidal_volume,
            respiratory_rate,
        } => {
            let vt = defaults.or_normal(tidal_volume, Respiratory, "tidal_volume")?;
            let rr = defaults.or_normal(respiratory_rate, Respiratory, "respiratory_rate")?;
            let value = respiratory::minute_ventilation(vt, rr);
            output.scalar("Minute ventilation", value, "L/min")
        }
        Commands::O2Sat { po2 } => {
            let po2 = defaults.or_normal(po2, Respiratory, "po2")?;
            output.scalar("SaO2", respiratory::o2_saturation(po2), "%")
        }
        Commands::Ranges { system } => {
            let system = system.map(|s| s.parse::<OrganSystem>()).transpose()?;
            print_ranges(&ranges, system, &output)
        }
        Commands::Curve { kind } => {
            let (points, x_label, y_label) = match kind {
                CurveKind::Osmolarity {
                    cortical,
                    max_depth,
                    steps,
                } => {
                    let cortical = defaults.or_normal(cortical, Renal, "osmolarity")?;
                    let max_depth = defaults.loop_depth(max_depth)?;
                    (
                        curve::osmolarity_profile(cortical, max_depth, steps),
                        "depth_mm",
                        "osmolarity_mosm_l",
                    )
                }
                CurveKind::O2Saturation { max_po2, steps } => {
                    let max_po2 = defaults.or_max(max_po2, Respiratory, "po2")?;
                    (
                        curve::dissociation_curve(max_po2, steps),
                        "po2_mmhg",
                        "saturation_pct",
                    )
                }
            };
            print_curve(&points, x_label, y_label, &output)
        }
    }
}

fn print_pv_loop(pv: &PvLoop, polygon: bool, output: &Output) -> Result<()> {
    match (output.format, polygon) {
        (OutputFormat::Json, false) => println!("{}", serde_json::to_string_pretty(pv)?),
        (OutputFormat::Json, true) => {
            println!("{}", serde_json::to_string_pretty(&pv.polygon())?)
        }
        (OutputFormat::Text, false) => {
            for (phase, point) in PvLoop::PHASES.iter().zip(pv.points()) {
                println!(
                    "{}: {} mL, {} mmHg",
                    phase,
                    output.round(point.volume),
                    output.round(point.pressure)
                );
            }
        }
        (OutputFormat::Text, true) => {
            for point in pv.polygon() {
                println!(
                    "{} {}",
                    output.round(point.volume),
                    output.round(point.pressure)
                );
            }
        }
    }

    Ok(())
}

fn print_ranges(ranges: &RangeTable, system: Option<OrganSystem>, output: &Output) -> Result<()> {
    if output.format == OutputFormat::Json {
        let json = match system {
            Some(s) => serde_json::to_string_pretty(ranges.system(s))?,
            None => serde_json::to_string_pretty(ranges)?,
        };
        println!("{}", json);
        return Ok(());
    }

    let systems: Vec<OrganSystem> = match system {
        Some(s) => vec![s],
        None => OrganSystem::ALL.to_vec(),
    };

    for system in systems {
        println!("[{}]", system);
        for (name, range) in ranges.system(system) {
            println!(
                "  {:<20} {:>8} - {:<8} normal {:<8} {}",
                name, range.min, range.max, range.normal, range.unit
            );
        }
    }

    Ok(())
}

fn print_curve(
    points: &[CurvePoint],
    x_label: &str,
    y_label: &str,
    output: &Output,
) -> Result<()> {
    if output.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(points)?);
        return Ok(());
    }

    curve::write_csv(points, x_label, y_label, io::stdout().lock())
}
