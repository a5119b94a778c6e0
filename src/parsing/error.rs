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
use thiserror::Error;

/// Failures while reading or writing lot CSV data. All of them abort the
/// whole operation; nothing is skipped or partially returned.
#[derive(Debug, Error)]
pub enum LotsError {
	/// The header row matches neither the current nor the legacy labels.
	#[error("unrecognized lot file header: {}", found.join(","))]
	BadHeader { found: Vec<String> },

	/// A cell could not be converted to its field's type. Rows are counted
	/// from 1, starting after the header.
	#[error("row {row}, column '{column}': cannot convert '{value}': {reason}")]
	Conversion {
		row: usize,
		column: &'static str,
		value: String,
		reason: String,
	},

	#[error("row {row} has {found} cells, expected at most {expected}")]
	RowLength {
		row: usize,
		expected: usize,
		found: usize,
	},

	#[error(transparent)]
	Csv(#[from] csv::Error),

	#[error(transparent)]
	Io(#[from] std::io::Error),
}
