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
use crate::util::amount::Cents;
use crate::util::date::Date;
use std::fmt;

/// A discrete tranche of shares that was bought in a single transaction and
/// possibly sold. A logical purchase may be split across several Lots when
/// only part of it is sold or matched; `buy_lot` ties those fragments back
/// together, and `form_position` ties split reporting-form lines together.
///
/// The shape is fixed once read, but the sale and adjustment fields are
/// rewritten in place by wash sale matching.
#[derive(Clone, Debug)]
pub struct Lot {
	pub num_shares: i64,
	pub symbol: String,
	pub description: String,

	pub buy_date: Date,

	/// May be increased by a disallowed wash sale loss
	pub basis: Cents,

	/// None means the lot has not been sold
	pub sell_date: Option<Date>,

	/// Zero when unsold
	pub proceeds: Cents,

	/// "W" for wash sales, otherwise empty
	pub adjustment_code: String,

	/// Disallowed loss, zero if none
	pub adjustment: Cents,

	pub form_position: String,

	/// Empty until the lot joins a LotCollection, which assigns one
	pub buy_lot: String,

	/// A lot can serve as replacement shares only once
	pub is_replacement: bool,

	/// Whether wash sale loss evaluation has already run on this lot. Not
	/// part of equality, and only written to disk on request.
	pub loss_processed: bool,
}

impl Lot {
	#[allow(clippy::too_many_arguments)]
	pub fn new(
		num_shares: i64,
		symbol: &str,
		description: &str,
		buy_date: Date,
		basis: Cents,
		sell_date: Option<Date>,
		proceeds: Cents,
		adjustment_code: &str,
		adjustment: Cents,
		form_position: &str,
		buy_lot: &str,
		is_replacement: bool,
	) -> Self {
		Self {
			num_shares,
			symbol: symbol.to_string(),
			description: description.to_string(),
			buy_date,
			basis,
			sell_date,
			proceeds,
			adjustment_code: adjustment_code.to_string(),
			adjustment,
			form_position: form_position.to_string(),
			buy_lot: buy_lot.to_string(),
			is_replacement,
			loss_processed: false,
		}
	}

	/// True if the lot was sold for less than its basis. Unsold lots are
	/// never losses, whatever their proceeds say.
	pub fn is_loss(&self) -> bool {
		self.sell_date.is_some() && self.proceeds < self.basis
	}

	/// Each field formatted for a table cell, in column order.
	pub fn display_fields(&self) -> Vec<String> {
		vec![
			self.num_shares.to_string(),
			self.symbol.clone(),
			self.description.clone(),
			self.buy_date.to_string(),
			self.basis.to_string(),
			match &self.sell_date {
				Some(date) => date.to_string(),
				None => "None".to_string(),
			},
			self.proceeds.to_string(),
			self.adjustment_code.clone(),
			self.adjustment.to_string(),
			self.form_position.clone(),
			self.buy_lot.clone(),
			display_bool(self.is_replacement).to_string(),
		]
	}
}

pub fn display_bool(value: bool) -> &'static str {
	if value {
		"True"
	} else {
		"False"
	}
}

impl PartialEq for Lot {
	fn eq(&self, other: &Self) -> bool {
		self.num_shares == other.num_shares
			&& self.symbol == other.symbol
			&& self.description == other.description
			&& self.buy_date == other.buy_date
			&& self.basis == other.basis
			&& self.sell_date == other.sell_date
			&& self.proceeds == other.proceeds
			&& self.adjustment_code == other.adjustment_code
			&& self.adjustment == other.adjustment
			&& self.form_position == other.form_position
			&& self.buy_lot == other.buy_lot
			&& self.is_replacement == other.is_replacement
	}
}

impl fmt::Display for Lot {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.display_fields().join(" "))
	}
}
