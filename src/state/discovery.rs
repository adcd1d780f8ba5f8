use std::collections::VecDeque;

/// Batches of newly inserted nodes waiting for a binding pass.
///
/// A batch that arrives while another is being drained is only queued; the
/// drain already in progress picks it up once the current batch is finished.
#[derive(Debug)]
pub struct DiscoveryQueue<T> {
    pending: VecDeque<Vec<T>>,
    draining: bool,
}

impl<T> Default for DiscoveryQueue<T> {
    fn default() -> Self {
        Self {
            pending: VecDeque::new(),
            draining: false,
        }
    }
}

impl<T> DiscoveryQueue<T> {
    pub fn push(&mut self, batch: Vec<T>) {
        if !batch.is_empty() {
            self.pending.push_back(batch);
        }
    }

    /// Claims the drain. `false` means a drain is already running.
    pub fn begin_drain(&mut self) -> bool {
        if self.draining {
            return false;
        }
        self.draining = true;
        true
    }

    /// Next batch for the current drain; releases the drain when empty.
    pub fn next_batch(&mut self) -> Option<Vec<T>> {
        let batch = self.pending.pop_front();
        if batch.is_none() {
            self.draining = false;
        }
        batch
    }

    pub fn is_draining(&self) -> bool {
        self.draining
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn drain(queue: &Rc<RefCell<DiscoveryQueue<u32>>>, seen: &mut Vec<u32>, nested: &mut Option<Vec<u32>>) {
        if !queue.borrow_mut().begin_drain() {
            return;
        }
        loop {
            let Some(batch) = queue.borrow_mut().next_batch() else {
                break;
            };
            for item in batch {
                seen.push(item);
                // a mutation notification delivered mid-pass
                if let Some(extra) = nested.take() {
                    queue.borrow_mut().push(extra);
                    let mut inner_seen = Vec::new();
                    drain(queue, &mut inner_seen, &mut None);
                    assert!(inner_seen.is_empty(), "re-entrant drain processed {inner_seen:?}");
                }
            }
        }
    }

    #[test]
    fn batches_drain_in_order() {
        let queue = Rc::new(RefCell::new(DiscoveryQueue::default()));
        queue.borrow_mut().push(vec![1, 2]);
        queue.borrow_mut().push(vec![3]);
        let mut seen = Vec::new();
        drain(&queue, &mut seen, &mut None);
        assert_eq!(seen, vec![1, 2, 3]);
        assert!(!queue.borrow().is_draining());
        assert!(queue.borrow().is_empty());
    }

    #[test]
    fn nested_notification_waits_for_current_batch() {
        let queue = Rc::new(RefCell::new(DiscoveryQueue::default()));
        queue.borrow_mut().push(vec![1, 2]);
        let mut seen = Vec::new();
        drain(&queue, &mut seen, &mut Some(vec![9]));
        assert_eq!(seen, vec![1, 2, 9]);
    }

    #[test]
    fn empty_batches_are_dropped() {
        let mut queue: DiscoveryQueue<u32> = DiscoveryQueue::default();
        queue.push(Vec::new());
        assert_eq!(queue.len(), 0);
        assert!(queue.begin_drain());
        assert!(queue.next_batch().is_none());
        assert!(!queue.is_draining());
    }
}
