//! Dashboard view composition
//!
//! Owns one animated slot per statistic. Each update pass reads the feed
//! slots, recomputes the derived figures, and retargets the animations
//! whose backing value changed. Tearing the view down cancels every
//! animation driver exactly once.

use std::sync::Arc;

use xrpool_core::{format_usd, DashboardConfig, DerivedStats, Statistic};
use xrpool_feeds::FeedSlot;
use xrpool_animation::{spawn_animation, AnimationConfig, AnimationHandle};

use crate::render::{CardView, FrameData};

/// One statistic card and its animation state
struct StatSlot {
    stat: Statistic,
    anim: AnimationHandle,
    /// Target applied last pass; retargets only fire on change
    last_target: Option<f64>,
}

/// The dashboard view
pub struct DashboardView {
    config: DashboardConfig,
    pool_slot: Arc<FeedSlot>,
    price_slot: Arc<FeedSlot>,
    slots: Vec<StatSlot>,
}

impl DashboardView {
    pub fn new(
        config: DashboardConfig,
        pool_slot: Arc<FeedSlot>,
        price_slot: Arc<FeedSlot>,
    ) -> Self {
        let anim_config = AnimationConfig {
            duration: config.animation_duration,
            refresh_tick: config.refresh_tick,
        };

        let slots = Statistic::ALL
            .iter()
            .map(|&stat| StatSlot {
                stat,
                anim: spawn_animation(0.0, anim_config),
                last_target: None,
            })
            .collect();

        Self {
            config,
            pool_slot,
            price_slot,
            slots,
        }
    }

    /// Recompute derived figures and retarget any animation whose backing
    /// value changed.
    pub fn update(&mut self) {
        let pool = self.pool_slot.value();
        let price = self.price_slot.value();
        let derived = DerivedStats::compute(pool, price, self.config.annual_rate);

        for slot in &mut self.slots {
            let target = derived.statistic_value(slot.stat, pool, self.config.annual_rate);
            if let Some(target) = target {
                if slot.last_target != Some(target) {
                    slot.anim.set_target(target);
                    slot.last_target = Some(target);
                }
            } else {
                slot.last_target = None;
            }
        }
    }

    /// Snapshot everything the renderer needs for one frame.
    pub fn frame(&self) -> FrameData {
        let pool = self.pool_slot.value();
        let price = self.price_slot.value();
        let derived = DerivedStats::compute(pool, price, self.config.annual_rate);

        let cards = self
            .slots
            .iter()
            .map(|slot| self.card(slot, &derived))
            .collect();

        let mut banners = Vec::new();
        if let Some(message) = self.pool_slot.error() {
            banners.push(format!("{}: {}", self.pool_slot.kind().label(), message));
        }
        if let Some(message) = self.price_slot.error() {
            banners.push(format!("{}: {}", self.price_slot.kind().label(), message));
        }

        FrameData {
            cards,
            banners,
            source_url: self.config.sheet.url.clone(),
            // freshness line only makes sense for data that actually loaded
            as_of: self.pool_slot.snapshot().ready_at(),
        }
    }

    fn card(&self, slot: &StatSlot, derived: &DerivedStats) -> CardView {
        let decimals = slot.stat.decimals();
        let value = match slot.last_target {
            // an absent input renders as a placeholder, not a frozen zero
            None => "—".to_string(),
            Some(_) => {
                let display = xrpool_core::format_amount(slot.anim.display(), decimals);
                match slot.stat {
                    Statistic::Apy => format!("{}%", display),
                    _ => format!("{} XRP", display),
                }
            }
        };

        let sub = match slot.stat {
            Statistic::PoolTotal if slot.last_target.is_some() => {
                Some(format!("≈ {}", format_usd(derived.pool_usd)))
            }
            Statistic::AnnualYield if slot.last_target.is_some() => {
                Some(format!("≈ {}", format_usd(derived.annual_yield_usd)))
            }
            _ => None,
        };

        CardView {
            title: slot.stat.title().to_string(),
            value,
            sub,
        }
    }

    /// Cancel every animation driver. Idempotent.
    pub fn teardown(&mut self) {
        for slot in &mut self.slots {
            slot.anim.stop();
        }
    }
}

impl Drop for DashboardView {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use xrpool_core::FeedKind;

    fn view_with_slots() -> (DashboardView, Arc<FeedSlot>, Arc<FeedSlot>) {
        let pool_slot = Arc::new(FeedSlot::new(FeedKind::PoolAmount));
        let price_slot = Arc::new(FeedSlot::new(FeedKind::UnitPrice));
        let view = DashboardView::new(
            DashboardConfig::default(),
            Arc::clone(&pool_slot),
            Arc::clone(&price_slot),
        );
        (view, pool_slot, price_slot)
    }

    #[tokio::test(start_paused = true)]
    async fn test_placeholders_before_first_fetch() {
        let (mut view, _pool, _price) = view_with_slots();
        view.update();

        let frame = view.frame();
        assert_eq!(frame.cards.len(), 4);
        // pool-driven cards are placeholders, the fixed APY animates at once
        assert_eq!(frame.cards[0].value, "—");
        assert_eq!(frame.cards[2].value, "—");
        assert_eq!(frame.cards[3].value, "—");
        assert!(frame.banners.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_values_animate_in_after_fetch() {
        let (mut view, pool, price) = view_with_slots();
        pool.publish_value(1_000_000.0);
        price.publish_value(0.50);
        view.update();

        tokio::time::sleep(Duration::from_secs(2)).await;
        let frame = view.frame();

        assert_eq!(frame.cards[0].value, "1,000,000 XRP");
        assert_eq!(frame.cards[0].sub.as_deref(), Some("≈ $500,000.00"));
        assert_eq!(frame.cards[1].value, "4.00%");
        assert_eq!(frame.cards[2].value, "40,000.00 XRP");
        assert_eq!(frame.cards[2].sub.as_deref(), Some("≈ $20,000.00"));
        assert_eq!(frame.cards[3].value, "3,333.33 XRP");
    }

    #[tokio::test(start_paused = true)]
    async fn test_feed_failure_surfaces_banner_and_placeholder() {
        let (mut view, pool, price) = view_with_slots();
        pool.publish_value(1_000_000.0);
        view.update();
        tokio::time::sleep(Duration::from_secs(2)).await;

        pool.publish_error("unexpected status: 503".to_string());
        price.publish_error("request failed: timed out".to_string());
        view.update();

        let frame = view.frame();
        assert_eq!(frame.cards[0].value, "—");
        assert_eq!(frame.banners.len(), 2);
        assert!(frame.banners[0].starts_with("Pool data:"));
        assert!(frame.banners[1].starts_with("Price data:"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_usd_sub_absent_without_price() {
        let (mut view, pool, _price) = view_with_slots();
        pool.publish_value(1_000_000.0);
        view.update();
        tokio::time::sleep(Duration::from_secs(2)).await;

        let frame = view.frame();
        assert_eq!(frame.cards[0].sub.as_deref(), Some("≈ —"));
        assert_eq!(frame.cards[2].sub.as_deref(), Some("≈ —"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_as_of_shown_only_while_data_is_loaded() {
        let (mut view, pool, _price) = view_with_slots();
        pool.publish_value(1_000_000.0);
        view.update();
        assert!(view.frame().as_of.is_some());

        // a failing feed's timestamp is not data freshness
        pool.publish_error("unexpected status: 503".to_string());
        view.update();
        assert_eq!(view.frame().as_of, None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_teardown_is_idempotent() {
        let (mut view, pool, _price) = view_with_slots();
        pool.publish_value(100.0);
        view.update();

        view.teardown();
        view.teardown();

        let frozen = view.frame();
        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(view.frame().cards[0].value, frozen.cards[0].value);
    }
}
