use crate::{catalog::Transition, events::LoanEvent, item::Item, item_status::ItemStatus};

/// Trait for lending transition observation
pub trait LoanObserver {
    /// Called after a borrow or return has been applied to `item`
    fn on_transition(&self, item: &Item, transition: &Transition);
}

/// Logs all transitions that occur in the catalog
#[derive(Debug)]
pub struct TransitionLogger;

impl LoanObserver for TransitionLogger {
    fn on_transition(&self, item: &Item, transition: &Transition) {
        let Transition { from, to, event, on, .. } = transition;
        log::info!("item {} on {on}: {from:?} --({event:?})--> {to:?}", item.id());
    }
}

/// Sends notifications for specific transitions
#[derive(Debug)]
pub struct NotificationService;

impl LoanObserver for NotificationService {
    fn on_transition(&self, item: &Item, transition: &Transition) {
        match (transition.from, transition.to, transition.event) {
            (ItemStatus::Available, ItemStatus::Borrowed, LoanEvent::Borrow { days }) => {
                log::info!("NOTIFICATION: '{}' has been borrowed for {days} days", item.title());
            }
            (ItemStatus::Borrowed, ItemStatus::Available, LoanEvent::Return) => {
                log::info!("NOTIFICATION: '{}' has been returned", item.title());
            }
            _ => {}
        }
    }
}
