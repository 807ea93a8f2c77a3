//! Tests for FundraiserAggregator.
//!
//! # Contract Points
//!
//! 1. A view is either fully populated or the call fails with `Aggregation`
//! 2. Fiat totals are derived from the rate passed to each cycle
//! 3. Ownership is exact address equality
//! 4. Only the latest cycle per campaign reaches the visible state

#[cfg(test)]
mod tests {
    use crate::config::EngineConfig;
    use crate::errors::Error;
    use crate::fundraisers::{FundraiserAggregator, FundraiserSyncState, SyncOutcome};
    use crate::ledger::{FieldValue, LedgerContractBinding, ReadQuery};
    use crate::testing::{
        addr, rate, LedgerErrorKind, MockLedger, CAMPAIGN, DONOR, OWNER, WEI_PER_NATIVE,
    };
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn setup() -> (Arc<MockLedger>, FundraiserAggregator) {
        let ledger = Arc::new(MockLedger::new());
        ledger.seed_campaign(CAMPAIGN, OWNER);
        let binding = LedgerContractBinding::new(ledger.clone(), EngineConfig::default());
        (ledger, FundraiserAggregator::new(binding))
    }

    // =========================================================================
    // aggregate
    // =========================================================================

    #[tokio::test]
    async fn test_aggregate_builds_full_view() {
        let (_ledger, aggregator) = setup();

        let view = aggregator
            .aggregate(&addr(CAMPAIGN), &rate(dec!(2000)), &addr(DONOR))
            .await
            .unwrap();

        let snapshot = &view.snapshot;
        assert_eq!(snapshot.name, "Clean Water");
        assert_eq!(snapshot.url, "https://example.org/water");
        assert_eq!(snapshot.image_url, "https://example.org/water.png");
        assert!(!snapshot.description.is_empty());
        assert_eq!(snapshot.donations_count, 3);
        assert_eq!(snapshot.total_donated_native, dec!(1.5));
        assert_eq!(snapshot.total_donated_fiat, dec!(3000.00));
        assert_eq!(snapshot.owner_address, addr(OWNER));
        assert_eq!(snapshot.beneficiary, addr(OWNER));

        assert_eq!(view.donations.len(), 2);
        assert_eq!(view.donations[0].amount_native, dec!(1));
        assert_eq!(view.donations[1].amount_native, dec!(0.5));
        assert_eq!(view.donations[0].date.timestamp(), 1_700_000_000);
        assert!(!view.is_owner);
        assert_eq!(view.rate.fiat_per_native, dec!(2000));
    }

    #[tokio::test]
    async fn test_donation_history_is_read_as_actor() {
        let (ledger, aggregator) = setup();

        aggregator
            .aggregate(&addr(CAMPAIGN), &rate(dec!(2000)), &addr(DONOR))
            .await
            .unwrap();

        let history_reads: Vec<_> = ledger
            .reads()
            .into_iter()
            .filter(|(_, query, _)| *query == ReadQuery::MyDonations)
            .collect();
        assert_eq!(history_reads.len(), 1);
        assert_eq!(history_reads[0].2.as_deref(), Some(DONOR));
    }

    #[tokio::test]
    async fn test_owner_requires_exact_match() {
        let (_ledger, aggregator) = setup();
        let rate = rate(dec!(2000));

        let as_owner = aggregator
            .aggregate(&addr(CAMPAIGN), &rate, &addr(OWNER))
            .await
            .unwrap();
        assert!(as_owner.is_owner);

        let lowercase_owner = addr(&OWNER.to_lowercase());
        let as_lowercase = aggregator
            .aggregate(&addr(CAMPAIGN), &rate, &lowercase_owner)
            .await
            .unwrap();
        assert!(!as_lowercase.is_owner);
    }

    #[tokio::test]
    async fn test_any_read_failure_fails_whole_aggregation() {
        for query in [
            ReadQuery::Name,
            ReadQuery::TotalDonations,
            ReadQuery::Owner,
            ReadQuery::Beneficiary,
            ReadQuery::MyDonations,
        ] {
            let (ledger, aggregator) = setup();
            ledger.fail_read(CAMPAIGN, query, LedgerErrorKind::Transport);

            let err = aggregator
                .aggregate(&addr(CAMPAIGN), &rate(dec!(2000)), &addr(DONOR))
                .await
                .unwrap_err();

            match err {
                Error::Aggregation { address, source } => {
                    assert_eq!(address, CAMPAIGN);
                    assert!(matches!(*source, Error::Transport(_)), "{:?}", query);
                }
                other => panic!("expected aggregation error, got {:?}", other),
            }
        }
    }

    #[tokio::test]
    async fn test_malformed_owner_is_decoding_failure() {
        let (ledger, aggregator) = setup();
        ledger.set_field(
            CAMPAIGN,
            ReadQuery::Owner,
            FieldValue::Address("garbage".to_string()),
        );

        let err = aggregator
            .aggregate(&addr(CAMPAIGN), &rate(dec!(2000)), &addr(DONOR))
            .await
            .unwrap_err();
        assert!(matches!(err.root_cause(), Error::Decoding(_)));
    }

    #[tokio::test]
    async fn test_invalid_rate_rejected_before_reads() {
        let (ledger, aggregator) = setup();
        let mut zero = rate(dec!(1));
        zero.fiat_per_native = dec!(0);

        let err = aggregator
            .aggregate(&addr(CAMPAIGN), &zero, &addr(DONOR))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::InvalidRate(_)));
        assert!(ledger.reads().is_empty());
    }

    #[tokio::test]
    async fn test_fiat_rederived_each_cycle() {
        let (_ledger, aggregator) = setup();
        let campaign = addr(CAMPAIGN);

        let first = aggregator
            .refresh(&campaign, &rate(dec!(2000)), &addr(DONOR))
            .await
            .unwrap();
        let second = aggregator
            .refresh(&campaign, &rate(dec!(2500)), &addr(DONOR))
            .await
            .unwrap();

        assert_eq!(
            first.applied().unwrap().snapshot.total_donated_fiat,
            dec!(3000)
        );
        assert_eq!(
            second.applied().unwrap().snapshot.total_donated_fiat,
            dec!(3750)
        );
        assert_eq!(
            aggregator.view(&campaign).unwrap().snapshot.total_donated_fiat,
            dec!(3750)
        );
    }

    // =========================================================================
    // refresh
    // =========================================================================

    #[tokio::test]
    async fn test_refresh_failure_is_visible_and_recoverable() {
        let (ledger, aggregator) = setup();
        let campaign = addr(CAMPAIGN);
        ledger.fail_read(CAMPAIGN, ReadQuery::Url, LedgerErrorKind::Decoding);

        let err = aggregator
            .refresh(&campaign, &rate(dec!(2000)), &addr(OWNER))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Aggregation { .. }));
        assert!(matches!(
            aggregator.state(&campaign),
            Some(FundraiserSyncState::Failed { .. })
        ));
        assert!(aggregator.view(&campaign).is_none());
        assert!(aggregator.last_known_owner(&campaign).is_none());

        ledger.clear_read_failures();
        aggregator
            .refresh(&campaign, &rate(dec!(2000)), &addr(OWNER))
            .await
            .unwrap();
        assert!(aggregator.view(&campaign).unwrap().is_owner);
        assert_eq!(aggregator.last_known_owner(&campaign), Some(addr(OWNER)));
    }

    #[tokio::test]
    async fn test_superseded_cycle_is_dropped() {
        let (ledger, aggregator) = setup();
        let campaign = addr(CAMPAIGN);
        let rate = rate(dec!(2000));
        let actor = addr(DONOR);

        // Hold the first cycle's name read until the second cycle has finished.
        let gate = ledger.gate(CAMPAIGN, ReadQuery::Name);

        let slow = aggregator.refresh(&campaign, &rate, &actor);
        let fast = async {
            tokio::task::yield_now().await;
            ledger.set_field(CAMPAIGN, ReadQuery::DonationsCount, FieldValue::Uint(4));
            ledger.set_field(
                CAMPAIGN,
                ReadQuery::TotalDonations,
                FieldValue::Uint(2 * WEI_PER_NATIVE),
            );
            let outcome = aggregator.refresh(&campaign, &rate, &actor).await;
            gate.notify_one();
            outcome
        };

        let (slow_outcome, fast_outcome) = tokio::join!(slow, fast);

        assert!(matches!(slow_outcome.unwrap(), SyncOutcome::Superseded { .. }));
        let applied = fast_outcome.unwrap();
        assert_eq!(applied.applied().unwrap().snapshot.donations_count, 4);

        let visible = aggregator.view(&campaign).unwrap();
        assert_eq!(visible.snapshot.donations_count, 4);
        assert_eq!(visible.snapshot.total_donated_fiat, dec!(4000));
    }

    #[tokio::test]
    async fn test_superseded_failure_does_not_override_newer_view() {
        let (ledger, aggregator) = setup();
        let campaign = addr(CAMPAIGN);
        let rate = rate(dec!(2000));
        let actor = addr(DONOR);

        let gate = ledger.gate(CAMPAIGN, ReadQuery::Name);

        let slow = aggregator.refresh(&campaign, &rate, &actor);
        let fast = async {
            tokio::task::yield_now().await;
            let outcome = aggregator.refresh(&campaign, &rate, &actor).await;
            // The held read of the first cycle fails once released.
            ledger.fail_read(CAMPAIGN, ReadQuery::Name, LedgerErrorKind::Transport);
            gate.notify_one();
            outcome
        };

        let (slow_outcome, fast_outcome) = tokio::join!(slow, fast);

        assert!(matches!(slow_outcome.unwrap(), SyncOutcome::Superseded { .. }));
        assert!(fast_outcome.unwrap().applied().is_some());
        assert!(matches!(
            aggregator.state(&campaign),
            Some(FundraiserSyncState::Ready(_))
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_refreshes_settle_on_applied_view() {
        let (_ledger, aggregator) = setup();
        let aggregator = Arc::new(aggregator);
        let campaign = addr(CAMPAIGN);

        let cycles: Vec<_> = (0..16)
            .map(|_| {
                let aggregator = aggregator.clone();
                let campaign = campaign.clone();
                tokio::spawn(async move {
                    aggregator
                        .refresh(&campaign, &rate(dec!(2000)), &addr(DONOR))
                        .await
                })
            })
            .collect();

        let mut applied = 0;
        for cycle in cycles {
            if cycle.await.unwrap().unwrap().applied().is_some() {
                applied += 1;
            }
        }

        assert!(applied >= 1);
        assert!(matches!(
            aggregator.state(&campaign),
            Some(FundraiserSyncState::Ready(_))
        ));
        assert_eq!(aggregator.last_known_owner(&campaign), Some(addr(OWNER)));
    }
}
