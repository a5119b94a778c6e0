/* Copyright © 2024-2025 Adam Train <adam@adamtrain.net>
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
use crate::reports::renderer::RendererKind;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
	pub display: Option<Display>,
	pub storage: Option<Storage>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Display {
	pub renderer: Option<RendererKind>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Storage {
	/// Keep each lot's loss processed flag in an extra column so that
	/// rerunning wash sale matching does not evaluate the same loss twice.
	pub persist_loss_processed: Option<bool>,
}

impl Config {
	pub fn renderer(&self) -> Option<RendererKind> {
		self.display.as_ref().and_then(|d| d.renderer)
	}

	pub fn persist_loss_processed(&self) -> Option<bool> {
		self.storage.as_ref().and_then(|s| s.persist_loss_processed)
	}
}
