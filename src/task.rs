// WGF
// copyright zipxing@hotmail.com 2022～2025

//! This module provides the frame-driven scheduler.
//!
//! A [`Timer`] counts down milliseconds of frame time. A [`Task`] wraps an
//! action which is run once per frame, or once per interval when the task
//! owns a timer. The [`TaskManager`] keeps named tasks in registration order
//! plus a FIFO queue of anonymous delayed callbacks.
//!
//! Actions receive only the caller's context `C`. In a game that is the
//! [`crate::context::Context`], so tasks can register further tasks,
//! switch scenes or quit.
//!
//! ```
//! use wgf::task::{TaskFlow, TaskManager};
//!
//! let mut tm: TaskManager<u32> = TaskManager::new();
//! tm.timed_task("tick", 100, |n: &mut u32| *n += 1);
//! tm.task("limit", |n: &mut u32| if *n >= 3 { TaskFlow::Stop } else { TaskFlow::Continue });
//! let mut count = 0u32;
//! for _ in 0..10 {
//!     tm.update(&mut count, 30);
//! }
//! assert_eq!(count, 3);
//! ```

use log::debug;
use std::mem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskStatus {
    Stopped,
    Paused,
    Active,
}

/// Returned by task actions, `Stop` ends a repeating task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TaskFlow {
    #[default]
    Continue,
    Stop,
}

impl From<()> for TaskFlow {
    fn from(_: ()) -> Self {
        TaskFlow::Continue
    }
}

/// Basic countdown timer, updated with the elapsed time of every frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timer {
    duration: i64,
    time_left: i64,
    status: TaskStatus,
    completion: bool,
}

impl Timer {
    /// negative durations are clamped to zero
    pub fn new(ms: i64) -> Self {
        let ms = ms.max(0);
        Self {
            duration: ms,
            time_left: ms,
            status: TaskStatus::Active,
            completion: false,
        }
    }

    /// Returns true once the countdown reached zero, until reset
    pub fn update(&mut self, delta_ms: u64) -> bool {
        if self.status != TaskStatus::Active {
            return self.completion;
        }
        self.time_left -= delta_ms as i64;
        if self.time_left <= 0 {
            self.status = TaskStatus::Stopped;
            self.completion = true;
        }
        self.completion
    }

    pub fn reset(&mut self) {
        self.time_left = self.duration;
        self.completion = false;
    }

    pub fn restart(&mut self) {
        self.reset();
        self.status = TaskStatus::Active;
    }

    /// Restart keeping the time that passed beyond zero, at most one
    /// interval is carried so a long frame fires once and the next frame
    /// fires again
    pub fn lap(&mut self) {
        let overshoot = (-self.time_left).clamp(0, self.duration);
        self.restart();
        self.time_left -= overshoot;
    }

    pub fn time_left(&self) -> i64 {
        self.time_left
    }

    pub fn duration(&self) -> i64 {
        self.duration
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn is_complete(&self) -> bool {
        self.completion
    }
}

pub type TaskAction<C> = Box<dyn FnMut(&mut C) -> TaskFlow>;
type Deferred<C> = Box<dyn FnOnce(&mut C)>;

pub struct Task<C> {
    pub name: String,
    /// empty while the action is running
    action: Option<TaskAction<C>>,
    status: TaskStatus,
    repeat: bool,
    timer: Option<Timer>,
}

impl<C> std::fmt::Debug for Task<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task")
            .field("name", &self.name)
            .field("status", &self.status)
            .field("repeat", &self.repeat)
            .field("timer", &self.timer)
            .finish()
    }
}

impl<C> Task<C> {
    pub fn new<F, R>(name: &str, repeat: bool, mut action: F) -> Self
    where
        F: FnMut(&mut C) -> R + 'static,
        R: Into<TaskFlow>,
    {
        Self {
            name: name.to_string(),
            action: Some(Box::new(move |ctx: &mut C| -> TaskFlow { action(ctx).into() })),
            status: TaskStatus::Active,
            repeat,
            timer: None,
        }
    }

    pub fn repeating<F, R>(name: &str, action: F) -> Self
    where
        F: FnMut(&mut C) -> R + 'static,
        R: Into<TaskFlow>,
    {
        Self::new(name, true, action)
    }

    pub fn once<F, R>(name: &str, action: F) -> Self
    where
        F: FnMut(&mut C) -> R + 'static,
        R: Into<TaskFlow>,
    {
        Self::new(name, false, action)
    }

    /// Task that only triggers once per `interval_ms` of frame time
    pub fn timed<F, R>(name: &str, interval_ms: i64, action: F) -> Self
    where
        F: FnMut(&mut C) -> R + 'static,
        R: Into<TaskFlow>,
    {
        let mut t = Self::new(name, true, action);
        t.timer = Some(Timer::new(interval_ms));
        t
    }

    pub fn with_repeat(mut self, repeat: bool) -> Self {
        self.repeat = repeat;
        self
    }

    pub fn update(&mut self, ctx: &mut C, delta_ms: u64) {
        if let Some(mut action) = self.begin(delta_ms) {
            let flow = action(ctx);
            self.finish(action, flow);
        }
    }

    /// Advances the timer and takes the action out if it is due
    fn begin(&mut self, delta_ms: u64) -> Option<TaskAction<C>> {
        if self.status != TaskStatus::Active || self.action.is_none() {
            return None;
        }
        if let Some(timer) = self.timer.as_mut() {
            if !timer.update(delta_ms) {
                return None;
            }
            timer.lap();
        }
        self.action.take()
    }

    fn finish(&mut self, action: TaskAction<C>, flow: TaskFlow) {
        self.action = Some(action);
        if !self.repeat || flow == TaskFlow::Stop {
            self.status = TaskStatus::Stopped;
        }
    }

    fn is_running(&self) -> bool {
        self.action.is_none()
    }

    pub fn stop(&mut self) {
        self.status = TaskStatus::Stopped;
    }

    pub fn pause(&mut self) {
        self.status = TaskStatus::Paused;
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn is_stopped(&self) -> bool {
        self.status == TaskStatus::Stopped
    }

    pub fn repeat(&self) -> bool {
        self.repeat
    }

    pub fn timer(&self) -> Option<&Timer> {
        self.timer.as_ref()
    }
}

pub struct TaskManager<C> {
    tasks: Vec<Task<C>>,
    /// registered during a pass, merged once the pass is over
    pending: Vec<Task<C>>,
    queue: Vec<(Timer, Deferred<C>)>,
    pub remove_complete: bool,
    in_pass: bool,
}

impl<C> Default for TaskManager<C> {
    fn default() -> Self {
        Self {
            tasks: vec![],
            pending: vec![],
            queue: vec![],
            remove_complete: false,
            in_pass: false,
        }
    }
}

impl<C> TaskManager<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_remove_complete(remove_complete: bool) -> Self {
        Self {
            remove_complete,
            ..Self::default()
        }
    }

    /// Registers a task, a task with the same name is replaced in place.
    /// During an update pass the task waits until the pass is over.
    pub fn add(&mut self, task: Task<C>) -> &mut Task<C> {
        let list = if self.in_pass {
            &mut self.pending
        } else {
            &mut self.tasks
        };
        let idx = match list.iter().position(|t| t.name == task.name) {
            Some(i) => {
                debug!("task {} replaced", task.name);
                list[i] = task;
                i
            }
            None => {
                list.push(task);
                list.len() - 1
            }
        };
        &mut list[idx]
    }

    pub fn task<F, R>(&mut self, name: &str, action: F) -> &mut Task<C>
    where
        F: FnMut(&mut C) -> R + 'static,
        R: Into<TaskFlow>,
    {
        self.add(Task::repeating(name, action))
    }

    pub fn task_once<F, R>(&mut self, name: &str, action: F) -> &mut Task<C>
    where
        F: FnMut(&mut C) -> R + 'static,
        R: Into<TaskFlow>,
    {
        self.add(Task::once(name, action))
    }

    pub fn timed_task<F, R>(&mut self, name: &str, interval_ms: i64, action: F) -> &mut Task<C>
    where
        F: FnMut(&mut C) -> R + 'static,
        R: Into<TaskFlow>,
    {
        self.add(Task::timed(name, interval_ms, action))
    }

    /// Schedules a nameless callback to fire once after `ms`
    pub fn do_later<F>(&mut self, ms: i64, f: F)
    where
        F: FnOnce(&mut C) + 'static,
    {
        self.queue.push((Timer::new(ms), Box::new(f)));
    }

    pub fn get(&self, name: &str) -> Option<&Task<C>> {
        self.pending
            .iter()
            .chain(self.tasks.iter())
            .find(|t| t.name == name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Task<C>> {
        self.pending
            .iter_mut()
            .chain(self.tasks.iter_mut())
            .find(|t| t.name == name)
    }

    pub fn remove(&mut self, name: &str) -> Option<Task<C>> {
        if let Some(idx) = self.pending.iter().position(|t| t.name == name) {
            return Some(self.pending.remove(idx));
        }
        let idx = self.tasks.iter().position(|t| t.name == name)?;
        Some(self.tasks.remove(idx))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tasks.iter().map(|t| t.name.as_str())
    }

    /// number of delayed callbacks still waiting
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Remove tasks with their status set to stopped
    pub fn remove_stopped(&mut self) {
        self.tasks.retain(|t| !t.is_stopped());
    }

    /// Perform all tasks assigned to this manager, then the delayed queue
    pub fn update(&mut self, ctx: &mut C, delta_ms: u64) {
        for task in self.tasks.iter_mut() {
            task.update(ctx, delta_ms);
        }
        self.end_pass();

        if !self.queue.is_empty() {
            let queue = mem::take(&mut self.queue);
            for (mut timer, f) in queue {
                if timer.update(delta_ms) {
                    f(ctx);
                } else {
                    self.queue.push((timer, f));
                }
            }
        }
    }

    /// Like [`TaskManager::update`] for a manager owned by the context
    /// itself, `tasks` finds it in there. The registry stays reachable
    /// while actions run, so they can stop, pause or remove other tasks.
    pub fn update_in(ctx: &mut C, delta_ms: u64, tasks: fn(&mut C) -> &mut TaskManager<C>) {
        tasks(ctx).in_pass = true;
        let mut idx = 0;
        while idx < tasks(ctx).tasks.len() {
            let task = &mut tasks(ctx).tasks[idx];
            let Some(mut action) = task.begin(delta_ms) else {
                idx += 1;
                continue;
            };
            let name = task.name.clone();
            let flow = action(ctx);
            // the action may have removed tasks, find it again
            let mgr = tasks(ctx);
            match mgr.tasks.iter().position(|t| t.name == name) {
                Some(p) => {
                    if mgr.tasks[p].is_running() {
                        mgr.tasks[p].finish(action, flow);
                    }
                    idx = p + 1;
                }
                None => debug!("task {} removed itself", name),
            }
        }
        tasks(ctx).end_pass();

        let queue = mem::take(&mut tasks(ctx).queue);
        let mut kept = Vec::with_capacity(queue.len());
        for (mut timer, f) in queue {
            if timer.update(delta_ms) {
                f(ctx);
            } else {
                kept.push((timer, f));
            }
        }
        let mgr = tasks(ctx);
        kept.append(&mut mgr.queue);
        mgr.queue = kept;
    }

    fn end_pass(&mut self) {
        self.in_pass = false;
        if self.remove_complete {
            self.remove_stopped();
        }
        for t in mem::take(&mut self.pending) {
            self.add(t);
        }
    }

    /// Moves tasks and callbacks of `other` into this manager,
    /// tasks of the same name are replaced
    pub fn merge(&mut self, other: TaskManager<C>) {
        for t in other.tasks {
            self.add(t);
        }
        self.queue.extend(other.queue);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_completes_at_duration() {
        let mut t = Timer::new(100);
        assert!(!t.update(60));
        assert!(!t.is_complete());
        assert!(t.update(40));
        assert_eq!(t.status(), TaskStatus::Stopped);
        // stays complete until reset
        assert!(t.update(10));
        t.reset();
        assert!(!t.is_complete());
        assert_eq!(t.status(), TaskStatus::Stopped);
        assert!(!t.update(500));
        t.restart();
        assert_eq!(t.status(), TaskStatus::Active);
        assert_eq!(t.time_left(), 100);
    }

    #[test]
    fn timer_negative_is_zero() {
        let mut t = Timer::new(-50);
        assert_eq!(t.duration(), 0);
        assert!(t.update(0));
    }

    #[test]
    fn timer_lap_carries_overshoot() {
        let mut t = Timer::new(100);
        assert!(t.update(120));
        t.lap();
        assert_eq!(t.time_left(), 80);
        assert!(t.update(500));
        t.lap();
        assert_eq!(t.time_left(), 0);
    }

    #[test]
    fn timed_task_fires_by_elapsed_time() {
        let mut tm: TaskManager<u32> = TaskManager::new();
        tm.timed_task("count", 100, |n: &mut u32| *n += 1);
        let mut n = 0;
        for _ in 0..10 {
            tm.update(&mut n, 30);
        }
        assert_eq!(n, 3);
    }

    #[test]
    fn stop_signal_ends_task() {
        let mut tm: TaskManager<u32> = TaskManager::new();
        tm.task("up", |n: &mut u32| {
            *n += 1;
            if *n == 2 {
                TaskFlow::Stop
            } else {
                TaskFlow::Continue
            }
        });
        let mut n = 0;
        for _ in 0..5 {
            tm.update(&mut n, 16);
        }
        assert_eq!(n, 2);
        assert!(tm.get("up").unwrap().is_stopped());
        tm.remove_stopped();
        assert!(tm.is_empty());
    }

    #[test]
    fn once_task_removed_when_reaping() {
        let mut tm: TaskManager<u32> = TaskManager::with_remove_complete(true);
        tm.task_once("hit", |n: &mut u32| *n += 10);
        tm.task("keep", |_: &mut u32| ());
        let mut n = 0;
        tm.update(&mut n, 16);
        assert_eq!(n, 10);
        assert!(!tm.contains("hit"));
        assert!(tm.contains("keep"));
    }

    #[test]
    fn paused_task_does_not_run() {
        let mut tm: TaskManager<u32> = TaskManager::new();
        tm.task("up", |n: &mut u32| *n += 1).pause();
        let mut n = 0;
        tm.update(&mut n, 16);
        assert_eq!(n, 0);
        assert_eq!(tm.get("up").unwrap().status(), TaskStatus::Paused);
    }

    #[test]
    fn replacing_keeps_registration_order() {
        let mut tm: TaskManager<Vec<&'static str>> = TaskManager::new();
        tm.task("a", |v: &mut Vec<&'static str>| v.push("a"));
        tm.task("b", |v: &mut Vec<&'static str>| v.push("b"));
        tm.task("a", |v: &mut Vec<&'static str>| v.push("a2"));
        let mut v = vec![];
        tm.update(&mut v, 16);
        assert_eq!(v, vec!["a2", "b"]);
        assert_eq!(tm.names().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn do_later_fires_in_fifo_order_after_tasks() {
        let mut tm: TaskManager<Vec<&'static str>> = TaskManager::new();
        tm.do_later(50, |v: &mut Vec<&'static str>| v.push("late"));
        tm.do_later(20, |v: &mut Vec<&'static str>| v.push("early"));
        tm.task("named", |v: &mut Vec<&'static str>| v.push("named"));
        let mut v = vec![];
        tm.update(&mut v, 30);
        assert_eq!(v, vec!["named", "early"]);
        assert_eq!(tm.queued(), 1);
        tm.update(&mut v, 30);
        assert_eq!(v, vec!["named", "early", "named", "late"]);
        assert_eq!(tm.queued(), 0);
    }

    struct World {
        tasks: TaskManager<World>,
        log: Vec<String>,
    }

    fn world() -> World {
        World {
            tasks: TaskManager::new(),
            log: vec![],
        }
    }

    fn run(w: &mut World, delta_ms: u64) {
        TaskManager::update_in(w, delta_ms, |w| &mut w.tasks);
    }

    #[test]
    fn task_stops_another_task() {
        let mut w = world();
        w.tasks.task("killer", |w: &mut World| {
            let found = w.tasks.get_mut("spam").map(|t| t.stop()).is_some();
            w.log.push(format!("killer found spam: {}", found));
        });
        w.tasks.task("spam", |w: &mut World| w.log.push("spam".into()));
        for _ in 0..3 {
            run(&mut w, 16);
        }
        assert_eq!(w.log, vec!["killer found spam: true"; 3]);
        assert!(w.tasks.get("spam").unwrap().is_stopped());
    }

    #[test]
    fn task_pauses_and_removes_others() {
        let mut w = world();
        w.tasks.task("a", |w: &mut World| w.log.push("a".into()));
        w.tasks.task("boss", |w: &mut World| {
            if let Some(t) = w.tasks.get_mut("a") {
                t.pause();
            }
            w.tasks.remove("c");
            w.log.push("boss".into());
        });
        w.tasks.task("c", |w: &mut World| w.log.push("c".into()));
        run(&mut w, 16);
        run(&mut w, 16);
        assert_eq!(w.log, vec!["a", "boss", "boss"]);
        assert_eq!(w.tasks.get("a").unwrap().status(), TaskStatus::Paused);
        assert_eq!(w.tasks.names().collect::<Vec<_>>(), vec!["a", "boss"]);
    }

    #[test]
    fn task_removing_itself_does_not_skip_the_next() {
        let mut w = world();
        w.tasks.task("quitter", |w: &mut World| {
            w.tasks.remove("quitter");
            w.log.push("quitter".into());
        });
        w.tasks.task("next", |w: &mut World| w.log.push("next".into()));
        run(&mut w, 16);
        assert_eq!(w.log, vec!["quitter", "next"]);
        assert!(!w.tasks.contains("quitter"));
    }

    #[test]
    fn tasks_added_during_a_pass_wait_for_the_next() {
        let mut w = world();
        w.tasks.task_once("spawner", |w: &mut World| {
            w.tasks.task("child", |w: &mut World| w.log.push("child".into()));
            // visible right away, but not run in this pass
            let seen = w.tasks.contains("child");
            w.log.push(format!("spawned: {}", seen));
            w.tasks.do_later(0, |w: &mut World| w.log.push("later".into()));
        });
        run(&mut w, 16);
        // callbacks run after all tasks of the frame
        assert_eq!(w.log, vec!["spawned: true", "later"]);
        run(&mut w, 16);
        assert_eq!(w.log, vec!["spawned: true", "later", "child"]);
        assert_eq!(w.tasks.queued(), 0);
    }

    #[test]
    fn task_stopping_itself_stays_stopped() {
        let mut w = world();
        w.tasks.task("self", |w: &mut World| {
            if let Some(t) = w.tasks.get_mut("self") {
                t.stop();
            }
            w.log.push("ran".into());
        });
        run(&mut w, 16);
        run(&mut w, 16);
        assert_eq!(w.log, vec!["ran"]);
        assert!(w.tasks.get("self").unwrap().is_stopped());
    }

    #[test]
    fn merge_adds_and_replaces() {
        let mut tm: TaskManager<u32> = TaskManager::new();
        tm.task("a", |n: &mut u32| *n += 1);
        let mut other: TaskManager<u32> = TaskManager::new();
        other.task("a", |n: &mut u32| *n += 100);
        other.task("b", |n: &mut u32| *n += 1000);
        other.do_later(0, |n: &mut u32| *n += 5);
        tm.merge(other);
        assert_eq!(tm.len(), 2);
        let mut n = 0;
        tm.update(&mut n, 1);
        assert_eq!(n, 1105);
    }
}
