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
use crate::reports::table::Table;
use clap::ValueEnum;
use serde::Deserialize;

/// Turns a header and rows of already-formatted cells into text. Picked once
/// at startup and handed to whatever needs to print lots.
pub trait Renderer {
	fn render(&self, header: &[String], rows: &[Vec<String>]) -> String;
}

/// Space-separated cells, one line per row.
pub struct PlainRenderer;

impl Renderer for PlainRenderer {
	fn render(&self, header: &[String], rows: &[Vec<String>]) -> String {
		let mut lines = Vec::with_capacity(rows.len() + 1);
		lines.push(header.join(" "));
		for row in rows {
			lines.push(row.join(" "));
		}
		lines.join("\n")
	}
}

/// Bordered ASCII table.
pub struct BoxedRenderer;

impl Renderer for BoxedRenderer {
	fn render(&self, header: &[String], rows: &[Vec<String>]) -> String {
		let mut table = Table::new(header.len());
		table.add_header(header);
		for row in rows {
			table.add_row(row);
		}
		table.render()
	}
}

#[derive(ValueEnum, Deserialize, Clone, Copy, Debug, Default, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
	Plain,
	#[default]
	Boxed,
}

impl RendererKind {
	pub fn build(&self) -> Box<dyn Renderer> {
		match self {
			RendererKind::Plain => Box::new(PlainRenderer),
			RendererKind::Boxed => Box::new(BoxedRenderer),
		}
	}
}
