use gray_kmeans::convergence::ConvergenceMonitor;
use gray_kmeans::{ClusterSet, KMeansError, MonitorState};

// ============================================================================
// Centroid store
// ============================================================================

#[test]
fn test_linear_seeding() {
    let clusters = ClusterSet::<f32>::initialize(4, 100).unwrap();
    assert_eq!(clusters.k(), 4);
    assert_eq!(
        clusters.centroids().to_vec(),
        vec![0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0]
    );
    assert!(clusters.clusters().all(|c| c.is_empty()));

    let five = ClusterSet::<f32>::initialize(5, 10).unwrap();
    assert_eq!(five.centroids().to_vec(), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
}

#[test]
fn test_linear_seeding_at_double_precision() {
    let clusters = ClusterSet::<f64>::initialize(4, 100).unwrap();
    assert_eq!(
        clusters.centroids().to_vec(),
        vec![0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0]
    );
}

#[test]
fn test_single_cluster_seeds_at_zero() {
    let clusters = ClusterSet::<f32>::initialize(1, 10).unwrap();
    assert_eq!(clusters.centroids().to_vec(), vec![0.0]);
}

#[test]
fn test_zero_clusters_rejected() {
    assert!(matches!(
        ClusterSet::<f32>::initialize(0, 10),
        Err(KMeansError::InvalidParameter(_))
    ));
    assert!(matches!(
        ClusterSet::<f32>::from_centroids(&[]),
        Err(KMeansError::InvalidParameter(_))
    ));
}

#[test]
fn test_members_grow_past_initial_reservation_and_clear() {
    // Reservation is ceil(10 / 2) = 5 per cluster; push well past it.
    let mut clusters = ClusterSet::<f32>::initialize(2, 10).unwrap();
    for i in 0..40 {
        clusters.push_member(i % 2, i).unwrap();
    }
    assert_eq!(clusters.get(0).count(), 20);
    assert_eq!(clusters.get(1).members()[..3], [1, 3, 5]);

    clusters.clear_members();
    assert!(clusters.clusters().all(|c| c.count() == 0));
    // Centroids survive a membership reset.
    assert_eq!(clusters.centroids().to_vec(), vec![0.0, 1.0]);
}

#[test]
fn test_cluster_views_follow_centroid_order() {
    let mut clusters = ClusterSet::<f32>::from_centroids(&[0.2, 0.8]).unwrap();
    clusters.push_member(1, 0).unwrap();
    clusters.push_member(0, 1).unwrap();
    clusters.push_member(1, 2).unwrap();

    let views: Vec<_> = clusters.clusters().collect();
    assert_eq!(views.len(), 2);
    assert_eq!(views[0].centroid, 0.2);
    assert_eq!(views[0].members(), &[1]);
    assert_eq!(views[1].centroid, 0.8);
    assert_eq!(views[1].members(), &[0, 2]);
}

#[test]
fn test_total_delta_is_l1_movement() {
    let mut clusters = ClusterSet::<f32>::from_centroids(&[0.0, 0.5, 1.0]).unwrap();
    let before = clusters.centroids().to_vec();
    clusters.set_centroid(0, 0.25);
    clusters.set_centroid(2, 0.5);
    assert_eq!(clusters.total_delta(&before), 0.75);
}

// ============================================================================
// Convergence monitor
// ============================================================================

#[test]
fn test_monitor_converges_when_delta_within_epsilon() {
    let mut clusters = ClusterSet::<f32>::from_centroids(&[0.0, 1.0]).unwrap();
    let mut monitor = ConvergenceMonitor::new(1e-4, 100);
    assert_eq!(monitor.state(), MonitorState::Init);

    monitor.begin_iteration(&clusters);
    assert_eq!(monitor.state(), MonitorState::Iterating);
    clusters.set_centroid(0, 0.5);
    assert_eq!(monitor.end_iteration(&clusters), MonitorState::Iterating);
    assert_eq!(monitor.last_delta(), Some(0.5));

    monitor.begin_iteration(&clusters);
    clusters.set_centroid(0, 0.50005);
    assert_eq!(monitor.end_iteration(&clusters), MonitorState::Converged);
    assert_eq!(monitor.iterations(), 2);
    assert!(monitor.state().is_terminal());
}

#[test]
fn test_monitor_stops_at_cap() {
    let mut clusters = ClusterSet::<f32>::from_centroids(&[0.0]).unwrap();
    let mut monitor = ConvergenceMonitor::new(1e-4, 3);

    let mut state = MonitorState::Init;
    for step in 1..=3 {
        monitor.begin_iteration(&clusters);
        clusters.set_centroid(0, step as f32 * 0.1);
        state = monitor.end_iteration(&clusters);
    }
    assert_eq!(state, MonitorState::MaxIterReached);
    assert_eq!(monitor.iterations(), 3);
}

#[test]
fn test_monitor_prefers_converged_on_last_iteration() {
    let clusters = ClusterSet::<f64>::from_centroids(&[0.3, 0.6]).unwrap();
    let mut monitor = ConvergenceMonitor::new(1e-4, 1);
    monitor.begin_iteration(&clusters);
    assert_eq!(monitor.end_iteration(&clusters), MonitorState::Converged);
}
