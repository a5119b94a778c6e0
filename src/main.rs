/* Copyright © 2024-2025 Adam Train <adam@trainrelay.net>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 */
use anyhow::{anyhow, bail, Error};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;
use washlots::config::config_file::Config;
use washlots::import::statement::{self, ImportFormat};
use washlots::investment::collection::LotCollection;
use washlots::investment::lot::Lot;
use washlots::investment::order::LotOrder;
use washlots::parsing::filesystem::Filesystem;
use washlots::parsing::lot_csv::{parse_csv, write_csv, CsvOptions, Separator};
use washlots::reports::renderer::RendererKind;

#[derive(Parser)]
#[command(
	name = "washlots",
	version = "0.1",
	about = "Stock tax lot tracking for wash sale accounting"
)]
struct Cli {
	// ----------------
	// -- POSITIONAL --
	// ----------------
	/// The command to execute
	command: Directive,

	// -----------
	// -- FLAGS --
	// -----------
	/// Specifies the input file
	#[arg(short)]
	file: String,

	/// Sort lots before output
	#[arg(short, long)]
	sort: Option<LotOrder>,

	/// Reverse the sort order
	#[arg(short, long)]
	reverse: bool,

	/// Table style for the print command (default: boxed)
	#[arg(long)]
	renderer: Option<RendererKind>,

	/// Custom config file location (default: ~/.config/washlots/config.toml)
	#[arg(long)]
	config: Option<String>,

	/// Write each lot's loss processed flag as an extra column
	#[arg(long)]
	persist_loss_processed: bool,

	/// Mark lots sold at a loss in the print command
	#[arg(long)]
	mark_losses: bool,

	/// Ticker symbol of the shares on an imported statement
	#[arg(long)]
	symbol: Option<String>,

	/// Output layout for the import command (default: lots)
	#[arg(long)]
	format: Option<ImportFormat>,

	/// Field separator for the import command (default: comma)
	#[arg(long)]
	separator: Option<Separator>,
}

impl Cli {
	/// Extra validations on top of what clap does
	fn validate(&self) -> Result<(), Error> {
		if self.reverse && self.sort.is_none() {
			bail!("--reverse requires --sort");
		}

		if self.mark_losses && self.command != Directive::Print {
			bail!("--mark-losses only applies to print");
		}

		if self.command != Directive::Import
			&& (self.format.is_some() || self.separator.is_some())
		{
			bail!("--format and --separator only apply to import");
		}

		if self.command == Directive::Import {
			if self.symbol.is_none() {
				bail!("Import requires --symbol");
			}
			if self.reverse {
				bail!("Import does not support --reverse");
			}
		}

		Ok(())
	}

	fn csv_options(&self, config: &Config) -> CsvOptions {
		CsvOptions {
			persist_loss_processed: self.persist_loss_processed
				|| config.persist_loss_processed().unwrap_or(false),
			separator: self.separator.unwrap_or_default(),
		}
	}
}

#[derive(ValueEnum, Clone, PartialEq)]
enum Directive {
	Fmt,   // rewrite the lot file in canonical form
	Print, // show lots as a table
	Check, // load the lot file and summarize it

	Import, // convert a pasted brokerage statement into a lot file
}

fn main() -> Result<(), Error> {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| EnvFilter::new("warn")),
		)
		.with_writer(std::io::stderr)
		.init();

	let args = Cli::parse();
	args.validate()?;

	let fs = Filesystem::new();
	let config = fs.get_config(args.config.as_ref())?;
	let text = fs.read(&args.file)?;

	match args.command {
		Directive::Import => {
			let symbol = args.symbol.as_deref().unwrap_or_default();
			let order = args.sort.unwrap_or(LotOrder::BuyDate);
			let lots = statement::import(&text, symbol, order)?;
			info!("imported {} lots from {}", lots.size(), args.file);
			match args.format.unwrap_or_default() {
				ImportFormat::Lots => {
					print!("{}", write_csv(&lots, &args.csv_options(&config))?)
				},
				ImportFormat::Human => print!(
					"{}",
					statement::write_human(&lots, args.separator.unwrap_or_default())?
				),
			}
		},
		Directive::Fmt => {
			let lots = load(&text, &args)?;
			print!("{}", write_csv(&lots, &args.csv_options(&config))?);
		},
		Directive::Print => {
			let lots = load(&text, &args)?;
			let renderer = args
				.renderer
				.or(config.renderer())
				.unwrap_or_default()
				.build();

			let losses: Vec<&Lot> = lots.iter().filter(|l| l.is_loss()).collect();
			let matched = if args.mark_losses {
				Some(&losses[..])
			} else {
				None
			};
			println!("{}", lots.render(renderer.as_ref(), matched));
		},
		Directive::Check => {
			let lots = load(&text, &args)?;
			check(&lots)?;
		},
	}

	Ok(())
}

/// Parses the lot file and applies any requested sort.
fn load(text: &str, args: &Cli) -> Result<LotCollection, Error> {
	let mut lots = parse_csv(text)?;
	info!("loaded {} lots from {}", lots.size(), args.file);

	if let Some(order) = args.sort {
		lots.sort(order, args.reverse);
	}
	Ok(lots)
}

fn check(lots: &LotCollection) -> Result<(), Error> {
	let sold = lots.iter().filter(|l| l.sell_date.is_some()).count();
	let losses = lots.iter().filter(|l| l.is_loss()).count();
	let replacements = lots.iter().filter(|l| l.is_replacement).count();
	let disallowed = lots
		.total_adjustment()
		.ok_or_else(|| anyhow!("Total adjustment is out of range"))?;

	println!("Lots: {}", lots.size());
	println!("Sold: {}", sold);
	println!("Losses: {}", losses);
	println!("Replacements: {}", replacements);
	println!("Adjustments: {}", disallowed);
	Ok(())
}
