use futures::FutureExt;
use futures::future::BoxFuture;

/// A batch of asynchronous effects returned by `update`. The shell spawns
/// each future on the runtime and feeds its result back into the loop as a
/// message.
pub struct Task<M> {
    futures: Vec<BoxFuture<'static, M>>,
}

impl<M> Task<M> {
    /// No effect.
    pub fn none() -> Self {
        Self { futures: Vec::new() }
    }

    /// Run a future and map its output into a message.
    pub fn perform<F, T>(future: F, map: impl FnOnce(T) -> M + Send + 'static) -> Self
    where
        F: Future<Output = T> + Send + 'static,
        T: Send + 'static,
        M: Send + 'static,
    {
        Self {
            futures: vec![future.map(map).boxed()],
        }
    }

    /// Combine several tasks into one.
    pub fn batch(tasks: impl IntoIterator<Item = Self>) -> Self {
        Self {
            futures: tasks.into_iter().flat_map(|t| t.futures).collect(),
        }
    }

    pub fn is_none(&self) -> bool {
        self.futures.is_empty()
    }

    pub fn into_futures(self) -> Vec<BoxFuture<'static, M>> {
        self.futures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perform_maps_the_output() {
        let task = Task::perform(async { 2 + 2 }, |n: i32| n * 10);
        let futures = task.into_futures();
        assert_eq!(futures.len(), 1);
        for future in futures {
            assert_eq!(futures::executor::block_on(future), 40);
        }
    }

    #[test]
    fn batch_flattens_empty_tasks_away() {
        let task = Task::batch([Task::none(), Task::perform(async {}, |_| 1u8), Task::none()]);
        assert_eq!(task.into_futures().len(), 1);
    }

    #[test]
    fn none_has_no_futures() {
        assert!(Task::<u8>::none().is_none());
    }
}
