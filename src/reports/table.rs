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
use std::fmt::Write;

/// Boxed ASCII table for listing lots, one per line:
///
/// ```text
/// +-----+------+
/// | Num | Symb |
/// +-----+------+
/// | 10  | ABC  |
/// +-----+------+
/// ```
pub struct Table {
	column_count: usize,
	rows: Vec<Row>,
}

pub enum Row {
	Header(Vec<String>),
	Data(Vec<String>),
}

impl Table {
	pub fn new(column_count: usize) -> Self {
		Self {
			column_count,
			rows: Vec::new(),
		}
	}

	/// Adds a header row.
	pub fn add_header(&mut self, row: &[String]) {
		self.rows.push(Row::Header(row.to_vec()));
	}

	/// Adds a data row.
	pub fn add_row(&mut self, row: &[String]) {
		self.rows.push(Row::Data(row.to_vec()));
	}

	pub fn render(&self) -> String {
		let mut max_widths = vec![0; self.column_count];

		// Calculate maximum column widths for proper spacing
		for row in &self.rows {
			let (Row::Data(cells) | Row::Header(cells)) = row;
			for (i, value) in cells.iter().enumerate().take(self.column_count) {
				max_widths[i] = max_widths[i].max(value.chars().count());
			}
		}

		let border = Table::border(&max_widths);
		let mut out = String::new();
		out.push_str(&border);

		for row in &self.rows {
			match row {
				Row::Header(cells) => {
					out.push('\n');
					out.push_str(&Table::cells_line(&max_widths, cells));
					out.push('\n');
					out.push_str(&border);
				},
				Row::Data(cells) => {
					out.push('\n');
					out.push_str(&Table::cells_line(&max_widths, cells));
				},
			}
		}

		if matches!(self.rows.last(), Some(Row::Data(_))) {
			out.push('\n');
			out.push_str(&border);
		}

		out
	}

	fn border(max_widths: &[usize]) -> String {
		let mut line = String::from("+");
		for width in max_widths {
			line.push_str(&"-".repeat(width + 2));
			line.push('+');
		}
		line
	}

	fn cells_line(max_widths: &[usize], cells: &[String]) -> String {
		let mut line = String::from("|");
		for (i, width) in max_widths.iter().enumerate() {
			let value = cells.get(i).map(String::as_str).unwrap_or_default();
			// writing to a String cannot fail
			let _ = write!(line, " {:<width$} |", value, width = width);
		}
		line
	}
}
