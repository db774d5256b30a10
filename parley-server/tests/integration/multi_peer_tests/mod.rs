mod test_full_scenario;
mod test_rooms_are_isolated;
mod test_three_peers_join;
