//! Point-of-sale cart and checkout for the store counter.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingTier {
    #[default]
    Retail,
    Wholesale,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub barcode: String,
    pub price: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wholesale_price: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost_price: Option<u64>,
    pub stock: u32,
}

impl Product {
    /// Unit price for a tier. A missing or zero wholesale price falls back to retail.
    pub fn price_for(&self, tier: PricingTier) -> u64 {
        match (tier, self.wholesale_price) {
            (PricingTier::Wholesale, Some(price)) if price > 0 => price,
            _ => self.price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
    pub applied_price: u64,
}

/// Figures shown in the payment panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CartTotals {
    pub subtotal: u64,
    /// Negative when the cart sells below cost.
    pub profit: i128,
    pub discount: u64,
    /// Subtotal less discount, never below zero.
    pub total: u64,
    pub item_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub tier: PricingTier,
    pub lines: Vec<CartLine>,
    pub discount: u64,
}

impl Cart {
    pub fn new(tier: PricingTier) -> Self {
        Self {
            tier,
            lines: Vec::new(),
            discount: 0,
        }
    }

    pub fn add(&mut self, product: &Product) -> Result<(), CheckoutError> {
        self.add_quantity(product, 1)
    }

    /// Adds `quantity` units, merging with an existing line for the same product.
    pub fn add_quantity(&mut self, product: &Product, quantity: u32) -> Result<(), CheckoutError> {
        if product.stock == 0 {
            return Err(CheckoutError::OutOfStock {
                product_id: product.id.clone(),
            });
        }

        let applied_price = product.price_for(self.tier);
        match self
            .lines
            .iter_mut()
            .find(|line| line.product.id == product.id)
        {
            Some(line) => {
                line.quantity = line.quantity.saturating_add(quantity.max(1));
                line.applied_price = applied_price;
            }
            None => self.lines.push(CartLine {
                product: product.clone(),
                quantity: quantity.max(1),
                applied_price,
            }),
        }
        Ok(())
    }

    /// Moves a line's quantity by `delta`, never below one. Returns the new quantity.
    pub fn change_quantity(&mut self, product_id: &str, delta: i64) -> Option<u32> {
        let line = self
            .lines
            .iter_mut()
            .find(|line| line.product.id == product_id)?;
        let quantity = (i64::from(line.quantity) + delta).clamp(1, i64::from(u32::MAX));
        line.quantity = quantity as u32;
        Some(line.quantity)
    }

    pub fn remove(&mut self, product_id: &str) -> bool {
        let before = self.lines.len();
        self.lines.retain(|line| line.product.id != product_id);
        self.lines.len() != before
    }

    /// Switches tier and reprices every line already in the cart.
    pub fn set_tier(&mut self, tier: PricingTier) {
        self.tier = tier;
        for line in &mut self.lines {
            line.applied_price = line.product.price_for(tier);
        }
    }

    pub fn set_discount(&mut self, discount: u64) {
        self.discount = discount;
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn totals(&self) -> Result<CartTotals, CheckoutError> {
        let mut subtotal: u64 = 0;
        let mut profit: i128 = 0;
        let mut item_count: u64 = 0;

        for line in &self.lines {
            let quantity = u64::from(line.quantity);
            let amount = line
                .applied_price
                .checked_mul(quantity)
                .ok_or(CheckoutError::Overflow)?;
            subtotal = subtotal
                .checked_add(amount)
                .ok_or(CheckoutError::Overflow)?;
            let cost = line.product.cost_price.unwrap_or(0);
            // u64 prices times u32 quantities stay well inside i128
            profit += (i128::from(line.applied_price) - i128::from(cost)) * i128::from(quantity);
            item_count += quantity;
        }

        Ok(CartTotals {
            subtotal,
            profit,
            discount: self.discount,
            total: subtotal.saturating_sub(self.discount),
            item_count,
        })
    }

    /// Settles the cart against `products` and, for credit sales, the customer's
    /// account. Nothing is changed unless every check passes; on success the
    /// cart is emptied.
    pub fn checkout(
        &mut self,
        method: PaymentMethod,
        customer: Option<&mut Customer>,
        products: &mut [Product],
    ) -> Result<Sale, CheckoutError> {
        if self.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        let totals = self.totals()?;

        let mut stock_moves = Vec::with_capacity(self.lines.len());
        for line in &self.lines {
            let index = products
                .iter()
                .position(|product| product.id == line.product.id)
                .ok_or_else(|| CheckoutError::UnknownProduct {
                    product_id: line.product.id.clone(),
                })?;
            let available = products[index].stock;
            if available < line.quantity {
                return Err(CheckoutError::InsufficientStock {
                    product_id: line.product.id.clone(),
                    available,
                    requested: line.quantity,
                });
            }
            stock_moves.push((index, line.quantity));
        }

        let customer_id = customer.as_ref().map(|customer| customer.id.clone());
        if method == PaymentMethod::Credit {
            let customer = customer.ok_or(CheckoutError::CustomerRequired)?;
            customer.charge(totals.total)?;
        }

        for (index, quantity) in stock_moves {
            products[index].stock -= quantity;
        }

        let sale = Sale {
            method,
            tier: self.tier,
            customer_id,
            lines: std::mem::take(&mut self.lines),
            totals,
        };
        self.discount = 0;
        Ok(sale)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    /// Negative while the customer owes the store.
    pub balance: i64,
    #[serde(default)]
    pub credit_limit: u64,
}

impl Customer {
    /// Credit still available before the limit is reached.
    pub fn remaining_credit(&self) -> u64 {
        let headroom = i128::from(self.credit_limit) + i128::from(self.balance);
        u64::try_from(headroom.max(0)).unwrap_or(u64::MAX)
    }

    /// Books `amount` against the account when it fits under the credit limit.
    pub fn charge(&mut self, amount: u64) -> Result<(), CheckoutError> {
        let remaining = self.remaining_credit();
        if amount > remaining {
            return Err(CheckoutError::CreditLimitExceeded { remaining });
        }
        let balance = i128::from(self.balance) - i128::from(amount);
        self.balance = i64::try_from(balance).map_err(|_| CheckoutError::Overflow)?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Credit,
}

/// Settled invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sale {
    pub method: PaymentMethod,
    pub tier: PricingTier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CheckoutError {
    #[error("cart is empty")]
    EmptyCart,
    #[error("product {product_id} is out of stock")]
    OutOfStock { product_id: String },
    #[error("product {product_id} has {available} in stock, {requested} requested")]
    InsufficientStock {
        product_id: String,
        available: u32,
        requested: u32,
    },
    #[error("product {product_id} is not in the catalogue")]
    UnknownProduct { product_id: String },
    #[error("credit sales need a customer")]
    CustomerRequired,
    #[error("credit limit exceeded, remaining {remaining}")]
    CreditLimitExceeded { remaining: u64 },
    #[error("cart totals exceed the supported amount range")]
    Overflow,
}
