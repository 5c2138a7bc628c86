use rps_game::TaskHandle;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;
use tokio::task::LocalSet;
use tokio::time::sleep;

fn ticker(count: Rc<Cell<u32>>) -> TaskHandle {
    TaskHandle::spawn_local(async move {
        let mut interval = tokio::time::interval(Duration::from_millis(100));
        loop {
            interval.tick().await;
            count.set(count.get() + 1);
        }
    })
}

#[tokio::test(start_paused = true)]
async fn test_no_ticks_after_stop() {
    LocalSet::new()
        .run_until(async {
            let count = Rc::new(Cell::new(0));
            let mut task = ticker(Rc::clone(&count));

            sleep(Duration::from_millis(350)).await;
            assert!(count.get() >= 3);
            assert!(!task.is_stopped());

            task.stop();
            let stopped_at = count.get();
            sleep(Duration::from_secs(5)).await;
            assert_eq!(count.get(), stopped_at);
            assert!(task.is_stopped());
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_stop_is_idempotent() {
    LocalSet::new()
        .run_until(async {
            let count = Rc::new(Cell::new(0));
            let mut task = ticker(Rc::clone(&count));
            task.stop();
            task.stop();
            assert!(task.is_stopped());
            sleep(Duration::from_secs(1)).await;
            assert_eq!(count.get(), 0);
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_drop_stops_task() {
    LocalSet::new()
        .run_until(async {
            let count = Rc::new(Cell::new(0));
            let task = ticker(Rc::clone(&count));
            sleep(Duration::from_millis(150)).await;
            drop(task);

            let dropped_at = count.get();
            sleep(Duration::from_secs(2)).await;
            assert_eq!(count.get(), dropped_at);
        })
        .await;
}

#[tokio::test(start_paused = true)]
async fn test_finished_task_reports_stopped() {
    LocalSet::new()
        .run_until(async {
            let task = TaskHandle::spawn_local(async {});
            sleep(Duration::from_millis(10)).await;
            assert!(task.is_stopped());
        })
        .await;
}
