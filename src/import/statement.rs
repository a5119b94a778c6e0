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
use crate::investment::collection::LotCollection;
use crate::investment::lot::Lot;
use crate::investment::order::LotOrder;
use crate::util::amount::Cents;
use crate::parsing::lot_csv::Separator;
use crate::util::date::Date;
use anyhow::{anyhow, bail, Error};
use clap::ValueEnum;
use csv::{Terminator, WriterBuilder};
use tracing::{debug, warn};

/// Each table row of a 1099-B copied out of a PDF viewer spans this many
/// lines of text.
const LINES_PER_ROW: usize = 3;

/// Columns of the human readable import output, meant for spreadsheets
/// rather than for loading back in.
pub const HUMAN_HEADERS: [&str; 8] = [
	"Symbol",
	"Num Shares",
	"Description",
	"Buy Date",
	"Sell Date",
	"Basis",
	"Proceeds",
	"Buy Lot",
];

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
pub enum ImportFormat {
	/// A lot file
	#[default]
	Lots,
	/// Dollar amounts and fewer columns
	Human,
}

/// One sale as read from a brokerage statement.
#[derive(Debug, PartialEq)]
pub struct Trade {
	pub num_shares: i64,
	pub buy_date: Date,
	pub sell_date: Date,
	pub basis: Cents,
	pub proceeds: Cents,
}

impl Trade {
	pub fn into_lot(self, symbol: &str) -> Lot {
		Lot::new(
			self.num_shares,
			symbol,
			&format!("{} shares of {}", self.num_shares, symbol),
			self.buy_date,
			self.basis,
			Some(self.sell_date),
			self.proceeds,
			"",
			Cents::zero(),
			"",
			"",
			false,
		)
	}
}

/// Joins every group of three lines and splits the result into words. A
/// trailing group with fewer lines is dropped.
pub fn group_rows(text: &str) -> Vec<Vec<String>> {
	let lines: Vec<&str> = text.lines().collect();
	let chunks = lines.chunks_exact(LINES_PER_ROW);
	if !chunks.remainder().is_empty() {
		warn!(
			"ignoring {} trailing line(s) that do not form a full row",
			chunks.remainder().len()
		);
	}

	chunks
		.map(|chunk| {
			chunk
				.iter()
				.flat_map(|line| line.split_whitespace())
				.map(|word| word.to_string())
				.collect()
		})
		.collect()
}

/// Reads a trade from the end of a row's words, where the columns are
/// share count, acquisition date, sale date, proceeds and cost basis.
/// Anything before those (descriptions, CUSIPs) is ignored.
pub fn parse_trade(words: &[String]) -> Result<Trade, Error> {
	if words.len() < 5 {
		bail!("Row has {} words, expected at least 5", words.len());
	}
	let field = |from_end: usize| words[words.len() - from_end].as_str();

	let shares = field(5).replace(',', "");
	let count = shares
		.parse::<f64>()
		.map_err(|e| anyhow!("Invalid share count '{}': {}", shares, e))?
		.trunc();
	// i64::MAX as f64 rounds up to 2^63, hence the strict upper bound
	if !count.is_finite() || count < i64::MIN as f64 || count >= i64::MAX as f64 {
		bail!("Share count '{}' is out of range", shares);
	}
	let num_shares = count as i64;

	Ok(Trade {
		num_shares,
		buy_date: Date::from_short_year_str(field(4))?,
		sell_date: Date::from_short_year_str(field(3))?,
		proceeds: Cents::from_dollars(field(2))?,
		basis: Cents::from_dollars(field(1))?,
	})
}

/// Converts pasted statement text into lots for `symbol`, sorted by buy or
/// sell date. Buy lots are left empty so that loading the written file
/// assigns them.
pub fn import(text: &str, symbol: &str, order: LotOrder) -> Result<LotCollection, Error> {
	let mut trades = Vec::new();
	for (i, words) in group_rows(text).iter().enumerate() {
		let trade = parse_trade(words).map_err(|e| {
			anyhow!("{} (row {}, starting at line {})", e, i + 1, i * LINES_PER_ROW + 1)
		})?;
		trades.push(trade);
	}
	debug!("read {} trades from statement", trades.len());

	match order {
		LotOrder::SellDate => trades.sort_by_key(|t| t.sell_date),
		_ => trades.sort_by_key(|t| t.buy_date),
	}

	let mut lots = LotCollection::default();
	for trade in trades {
		lots.add(trade.into_lot(symbol));
	}
	Ok(lots)
}

/// Writes imported lots in the human readable layout, with amounts as
/// dollars.
pub fn write_human(lots: &LotCollection, separator: Separator) -> Result<String, Error> {
	let mut writer = WriterBuilder::new()
		.terminator(Terminator::CRLF)
		.delimiter(separator.delimiter())
		.from_writer(Vec::new());

	writer.write_record(HUMAN_HEADERS)?;
	for lot in lots {
		writer.write_record([
			lot.symbol.clone(),
			lot.num_shares.to_string(),
			lot.description.clone(),
			lot.buy_date.to_disk_string(),
			lot.sell_date.map(|d| d.to_disk_string()).unwrap_or_default(),
			lot.basis.to_string(),
			lot.proceeds.to_string(),
			lot.buy_lot.clone(),
		])?;
	}

	let buf = writer.into_inner().map_err(|e| anyhow!("{}", e))?;
	Ok(String::from_utf8(buf)?)
}
