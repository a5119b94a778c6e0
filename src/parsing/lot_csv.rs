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

//! Reading and writing lot files. A lot file is CSV with a header row and
//! one lot per row, in this fixed column order:
//!
//! ```text
//! Num Shares,Symbol,Description,Buy Date,Basis,Sell Date,Proceeds,Adjustment Code,Adjustment,Form Position,Buy Lot,Is Replacement
//! 10,ABC,A,09/15/2014,200000,10/05/2014,180000,,,lot1,,False
//! ```
//!
//! Older files use a legacy set of header labels for the same columns; both
//! are read, only the current labels are written. Money is in integer cents
//! and dates are MM/DD/YYYY. Empty integer cells mean zero and empty date
//! cells mean no date.

use crate::investment::collection::LotCollection;
use crate::investment::lot::{display_bool, Lot};
use crate::parsing::error::LotsError;
use crate::util::amount::Cents;
use crate::util::date::Date;
use clap::ValueEnum;
use csv::{ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use std::io;
use tracing::debug;

pub const HEADERS: [&str; 12] = [
	"Num Shares",
	"Symbol",
	"Description",
	"Buy Date",
	"Basis",
	"Sell Date",
	"Proceeds",
	"Adjustment Code",
	"Adjustment",
	"Form Position",
	"Buy Lot",
	"Is Replacement",
];

pub const LEGACY_HEADERS: [&str; 12] = [
	"Cnt",
	"Sym",
	"Desc",
	"BuyDate",
	"Basis",
	"SellDate",
	"Proceeds",
	"AdjCode",
	"Adj",
	"FormPosition",
	"BuyLot",
	"IsReplacement",
];

/// Optional trailing column, only present when loss processing state is
/// being persisted.
pub const LOSS_PROCESSED_HEADER: &str = "Loss Processed";
pub const LEGACY_LOSS_PROCESSED_HEADER: &str = "LossProcessed";

/// Field separator for written output. Lot files that are read back must
/// be comma separated; tabs are for pasting into spreadsheets.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq)]
pub enum Separator {
	#[default]
	Comma,
	Tab,
}

impl Separator {
	pub fn delimiter(self) -> u8 {
		match self {
			Separator::Comma => b',',
			Separator::Tab => b'\t',
		}
	}
}

#[derive(Clone, Copy, Debug, Default)]
pub struct CsvOptions {
	/// Write the loss processed flag as a 13th column
	pub persist_loss_processed: bool,
	pub separator: Separator,
}

#[derive(Debug, PartialEq)]
enum Vocabulary {
	Current,
	Legacy,
}

/// The shape of a file as determined by its header row.
#[derive(Debug)]
struct Layout {
	vocabulary: Vocabulary,
	has_loss_processed: bool,
}

impl Layout {
	fn detect(header: &StringRecord) -> Result<Layout, LotsError> {
		let cells: Vec<&str> = header.iter().collect();
		let bad_header = || LotsError::BadHeader {
			found: cells.iter().map(|s| s.to_string()).collect(),
		};

		let (fields, extra) = match cells.len() {
			12 => (&cells[..], None),
			13 => (&cells[..12], Some(cells[12])),
			_ => return Err(bad_header()),
		};

		let vocabulary = if fields == HEADERS {
			Vocabulary::Current
		} else if fields == LEGACY_HEADERS {
			Vocabulary::Legacy
		} else {
			return Err(bad_header());
		};

		let has_loss_processed = match (extra, &vocabulary) {
			(None, _) => false,
			(Some(LOSS_PROCESSED_HEADER), Vocabulary::Current) => true,
			(Some(LEGACY_LOSS_PROCESSED_HEADER), Vocabulary::Legacy) => true,
			_ => return Err(bad_header()),
		};

		Ok(Layout {
			vocabulary,
			has_loss_processed,
		})
	}

	/// Labels as they appear in the file, for error reports.
	fn labels(&self) -> &'static [&'static str; 12] {
		match self.vocabulary {
			Vocabulary::Current => &HEADERS,
			Vocabulary::Legacy => &LEGACY_HEADERS,
		}
	}

	fn column_count(&self) -> usize {
		if self.has_loss_processed {
			13
		} else {
			12
		}
	}
}

/// Parses a whole lot file held in memory.
pub fn parse_csv(data: &str) -> Result<LotCollection, LotsError> {
	parse_csv_from(data.as_bytes())
}

/// Parses lot CSV from a reader. The header must match one of the accepted
/// label sets, or nothing is read. The first cell that fails to convert
/// aborts the parse. Lots without a buy lot are given synthetic ones.
pub fn parse_csv_from<R: io::Read>(reader: R) -> Result<LotCollection, LotsError> {
	let mut reader = ReaderBuilder::new()
		.has_headers(false)
		.flexible(true)
		.from_reader(reader);

	let mut records = reader.records();
	let header = match records.next() {
		Some(header) => header?,
		None => return Err(LotsError::BadHeader { found: vec![] }),
	};
	let layout = Layout::detect(&header)?;
	if layout.vocabulary == Vocabulary::Legacy {
		debug!("reading lot file with legacy header labels");
	}

	let mut lots = Vec::new();
	for (i, record) in records.enumerate() {
		lots.push(parse_row(&record?, i + 1, &layout)?);
	}

	debug!("parsed {} lots", lots.len());
	Ok(LotCollection::new(lots))
}

fn parse_row(
	record: &StringRecord,
	row: usize,
	layout: &Layout,
) -> Result<Lot, LotsError> {
	let expected = layout.column_count();
	if record.len() > expected {
		return Err(LotsError::RowLength {
			row,
			expected,
			found: record.len(),
		});
	}

	// short rows read as if the missing trailing cells were empty
	let cell = |i: usize| record.get(i).unwrap_or_default();
	let label = layout.labels();

	let mut lot = Lot::new(
		to_int(row, label[0], cell(0))?,
		cell(1),
		cell(2),
		to_date(row, label[3], cell(3))?
			.ok_or_else(|| conversion(row, label[3], "", "buy date is required"))?,
		Cents(to_int(row, label[4], cell(4))?),
		to_date(row, label[5], cell(5))?,
		Cents(to_int(row, label[6], cell(6))?),
		cell(7),
		Cents(to_int(row, label[8], cell(8))?),
		cell(9),
		cell(10),
		to_bool(cell(11)),
	);

	if layout.has_loss_processed {
		lot.loss_processed = to_bool(cell(12));
	}

	Ok(lot)
}

fn conversion(row: usize, column: &'static str, value: &str, reason: &str) -> LotsError {
	LotsError::Conversion {
		row,
		column,
		value: value.to_string(),
		reason: reason.to_string(),
	}
}

fn to_int(row: usize, column: &'static str, value: &str) -> Result<i64, LotsError> {
	if value.is_empty() {
		return Ok(0);
	}
	value
		.trim()
		.parse::<i64>()
		.map_err(|e| conversion(row, column, value, &e.to_string()))
}

fn to_date(row: usize, column: &'static str, value: &str) -> Result<Option<Date>, LotsError> {
	if value.is_empty() {
		return Ok(None);
	}
	Date::from_disk_str(value)
		.map(Some)
		.map_err(|e| conversion(row, column, value, &e.to_string()))
}

fn to_bool(value: &str) -> bool {
	value.to_lowercase() == "true"
}

fn from_int(value: i64) -> String {
	if value == 0 {
		String::new()
	} else {
		value.to_string()
	}
}

fn from_date(value: &Option<Date>) -> String {
	value.map(|d| d.to_disk_string()).unwrap_or_default()
}

/// Serializes the collection, in its current order, under the current
/// header labels.
pub fn write_csv(lots: &LotCollection, options: &CsvOptions) -> Result<String, LotsError> {
	let mut buf = Vec::new();
	write_csv_to(lots, options, &mut buf)?;
	String::from_utf8(buf).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e).into())
}

/// Lines end in CRLF and cells are quoted only when they need it.
pub fn write_csv_to<W: io::Write>(
	lots: &LotCollection,
	options: &CsvOptions,
	writer: W,
) -> Result<(), LotsError> {
	let mut writer = WriterBuilder::new()
		.terminator(Terminator::CRLF)
		.delimiter(options.separator.delimiter())
		.from_writer(writer);

	let mut header = HEADERS.to_vec();
	if options.persist_loss_processed {
		header.push(LOSS_PROCESSED_HEADER);
	}
	writer.write_record(&header)?;

	for lot in lots {
		let mut row = vec![
			from_int(lot.num_shares),
			lot.symbol.clone(),
			lot.description.clone(),
			lot.buy_date.to_disk_string(),
			from_int(lot.basis.0),
			from_date(&lot.sell_date),
			from_int(lot.proceeds.0),
			lot.adjustment_code.clone(),
			from_int(lot.adjustment.0),
			lot.form_position.clone(),
			lot.buy_lot.clone(),
			display_bool(lot.is_replacement).to_string(),
		];
		if options.persist_loss_processed {
			row.push(display_bool(lot.loss_processed).to_string());
		}
		writer.write_record(&row)?;
	}

	writer.flush()?;
	debug!("wrote {} lots", lots.size());
	Ok(())
}
