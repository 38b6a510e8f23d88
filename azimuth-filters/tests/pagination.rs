use azimuth_filters::pagination::{PaginationPolicy, PaginationWindow, ROW_HEIGHT};

#[test]
fn test_initial_window_is_clamped() {
    assert_eq!(PaginationWindow::new(0).revealed_count(), 0);
    assert_eq!(PaginationWindow::new(3).revealed_count(), 3);
    assert_eq!(PaginationWindow::new(11).revealed_count(), 5);
}

#[test]
fn test_eleven_options_exhaust_in_one_step() {
    let mut window = PaginationWindow::new(11);
    assert_eq!(window.height(ROW_HEIGHT), 5 * 28);
    assert_eq!(window.next_step(), 6);

    assert_eq!(window.reveal_more(), 6);
    assert_eq!(window.revealed_count(), 11);
    assert_eq!(window.height(ROW_HEIGHT), 11 * 28);
    assert!(!window.has_more());
}

#[test]
fn test_twenty_one_options_take_two_steps() {
    let mut window = PaginationWindow::new(21);
    assert_eq!(window.next_step(), 15);
    window.reveal_more();
    assert_eq!(window.revealed_count(), 20);
    assert_eq!(window.height(ROW_HEIGHT), 20 * 28);

    assert_eq!(window.next_step(), 1);
    window.reveal_more();
    assert_eq!(window.revealed_count(), 21);
    assert_eq!(window.pending_count(), 0);
    assert!(!window.has_more());
}

#[test]
fn test_reveal_past_end_is_clamped() {
    let mut window = PaginationWindow::new(4);
    assert_eq!(window.reveal_more(), 0);
    assert_eq!(window.revealed_count(), 4);
}

#[test]
fn test_every_total_is_exhausted() {
    for total in 0..100 {
        let mut window = PaginationWindow::new(total);
        let mut steps = 0;
        while window.has_more() {
            let pending = window.pending_count();
            assert_eq!(window.reveal_more(), pending.min(15));
            steps += 1;
            assert!(steps <= total);
        }
        assert_eq!(window.revealed_count(), total);
    }
}

#[test]
fn test_visible_prefix() {
    let items: Vec<u32> = (0..8).collect();
    let mut window = PaginationWindow::new(items.len());
    assert_eq!(window.visible_prefix(&items), &[0, 1, 2, 3, 4]);
    window.reveal_more();
    assert_eq!(window.visible_prefix(&items), items.as_slice());
}

#[test]
fn test_reset_starts_over() {
    let mut window = PaginationWindow::new(30);
    window.reveal_more();
    window.reset(2);
    assert_eq!(window.total(), 2);
    assert_eq!(window.revealed_count(), 2);
}

#[test]
fn test_custom_policy() {
    let policy = PaginationPolicy {
        initial_visible: 2,
        reveal_step: 0,
    };
    let mut window = PaginationWindow::with_policy(4, policy);
    assert_eq!(window.revealed_count(), 2);
    // a zero step is raised so the list can still be exhausted
    assert_eq!(window.reveal_more(), 1);
    assert_eq!(window.reveal_more(), 1);
    assert!(!window.has_more());
}
