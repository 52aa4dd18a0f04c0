//! Context menus opened by right clicks.

#[cfg(test)]
mod tests {
    use morphic::{
        Morph, NodeId,
        error::Result,
        event::{key::Mods, mouse::Button},
        geom::{Point, Rect},
        preferences::Preferences,
        testing::{Harness, Log, Recorder, log},
    };

    fn menu_owner(h: &mut Harness, recorder: Recorder) -> Result<NodeId> {
        h.add(Morph::new(recorder).bounds(Rect::from_xywh(20.0, 20.0, 100.0, 100.0)))
    }

    fn open_menu(h: &Harness) -> Option<(NodeId, String)> {
        let core = &h.world.core;
        core.active_menu().map(|m| (m, core.name_of(m).to_string()))
    }

    fn logged(l: &Log, entry: &str) -> bool {
        l.lock().is_ok_and(|l| l.iter().any(|e| e == entry))
    }

    #[test]
    fn right_click_opens_the_user_menu_at_the_hand() -> Result<()> {
        let l = log();
        let mut h = Harness::new();
        menu_owner(&mut h, Recorder::new("r", &l).with_menu())?;
        h.right_click(Point::new(50.0, 60.0));

        let (menu, name) = open_menu(&h).expect("a menu is open");
        assert_eq!(name, "r_menu");
        assert_eq!(h.world.core.bounds(menu).origin, Point::new(50.0, 60.0));
        assert_eq!(h.world.core.parent_of(menu), Some(h.root()));
        assert!(logged(&l, "r.user_menu"));
        assert!(logged(&l, "r.mouse_click_right"));
        Ok(())
    }

    #[test]
    fn developer_mode_offers_the_developers_menu() -> Result<()> {
        let l = log();
        let prefs = Preferences {
            dev_mode: true,
            ..Preferences::default()
        };
        let mut h = Harness::with_preferences(Point::new(400.0, 300.0), prefs)?;
        menu_owner(&mut h, Recorder::new("r", &l).with_menu())?;
        h.right_click(Point::new(50.0, 60.0));
        assert_eq!(open_menu(&h).map(|(_, n)| n).as_deref(), Some("r_dev_menu"));
        assert!(!logged(&l, "r.user_menu"));
        Ok(())
    }

    #[test]
    fn control_click_counts_as_a_right_click() -> Result<()> {
        let l = log();
        let mut h = Harness::new();
        menu_owner(&mut h, Recorder::new("r", &l).with_menu())?;
        h.press_with(Point::new(50.0, 60.0), Button::Left, Mods::CTRL);
        h.release(Point::new(50.0, 60.0));
        assert!(open_menu(&h).is_some());
        assert!(logged(&l, "r.mouse_down_right"));
        Ok(())
    }

    #[test]
    fn menus_stay_inside_the_world() -> Result<()> {
        let l = log();
        let mut h = Harness::new();
        h.add(
            Morph::new(Recorder::new("r", &l).with_menu())
                .bounds(Rect::from_xywh(300.0, 200.0, 100.0, 100.0)),
        )?;
        h.right_click(Point::new(390.0, 290.0));
        let (menu, _) = open_menu(&h).expect("a menu is open");
        assert_eq!(h.world.core.bounds(menu), Rect::from_xywh(340.0, 220.0, 60.0, 80.0));
        Ok(())
    }

    #[test]
    fn a_press_elsewhere_closes_the_menu() -> Result<()> {
        let l = log();
        let mut h = Harness::new();
        menu_owner(&mut h, Recorder::new("r", &l).with_menu())?;
        h.right_click(Point::new(50.0, 60.0));
        let (menu, _) = open_menu(&h).expect("a menu is open");

        // Presses inside the menu leave it open.
        h.click(Point::new(70.0, 100.0));
        assert_eq!(h.world.core.active_menu(), Some(menu));

        h.click(Point::new(300.0, 250.0));
        assert_eq!(h.world.core.active_menu(), None);
        assert!(!h.world.core.contains(menu));
        Ok(())
    }

    #[test]
    fn a_second_menu_replaces_the_first() -> Result<()> {
        let l = log();
        let mut h = Harness::new();
        menu_owner(&mut h, Recorder::new("r", &l).with_menu())?;
        h.right_click(Point::new(30.0, 30.0));
        let (first, _) = open_menu(&h).expect("a menu is open");
        h.right_click(Point::new(110.0, 110.0));
        let (second, _) = open_menu(&h).expect("a menu is open");
        assert_ne!(first, second);
        assert!(!h.world.core.contains(first));
        Ok(())
    }

    #[test]
    fn a_handled_right_press_suppresses_the_menu() -> Result<()> {
        let l = log();
        let mut h = Harness::new();
        menu_owner(&mut h, Recorder::new("r", &l).with_menu().handling())?;
        h.right_click(Point::new(50.0, 60.0));
        assert!(open_menu(&h).is_none());
        assert!(!logged(&l, "r.user_menu"));
        Ok(())
    }

    #[test]
    fn the_nearest_ancestor_with_a_menu_answers() -> Result<()> {
        let l = log();
        let mut h = Harness::new();
        let outer = menu_owner(&mut h, Recorder::new("outer", &l).with_menu())?;
        h.add_to(
            outer,
            Morph::new(Recorder::new("inner", &l)).bounds(Rect::from_xywh(30.0, 30.0, 20.0, 20.0)),
        )?;
        h.right_click(Point::new(40.0, 40.0));
        assert_eq!(open_menu(&h).map(|(_, n)| n).as_deref(), Some("outer_menu"));
        Ok(())
    }

    #[test]
    fn right_clicking_the_bare_world_opens_nothing() {
        let mut h = Harness::new();
        h.right_click(Point::new(200.0, 150.0));
        assert!(open_menu(&h).is_none());
    }
}
