use chrono::NaiveDate;
use log;

use crate::agenda::Agenda;
use crate::calendar::*;
use crate::config::Config;
use crate::grid::{month_grid, MonthGrid};
use crate::provider::*;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    SelectDay(u32),
    PreviousMonth,
    NextMonth,
    AddEvent { title: String, date: DateKey },
    OpenForm,
    CloseForm,
    EditTitle(String),
    SetFormDate(DateKey),
    SubmitForm,
    GoToday,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Form {
    pub open: bool,
    pub title: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Context {
    cursor: CalendarCursor,
    selected: DateKey,
    today: DateKey,
    agenda: Agenda,
    form: Form,
    range: SupportedRange,
    week_start: WeekStart,
}

impl Context {
    pub fn new(today: NaiveDate, range: SupportedRange, week_start: WeekStart) -> Self {
        let start = range.clamp(to_key(&today));
        if start != to_key(&today) {
            log::warn!("Today is outside of the supported range, starting on {}", start);
        }

        Context {
            cursor: CalendarCursor::of(&start.date()),
            selected: start,
            today: to_key(&today),
            agenda: Agenda::new(),
            form: Form::default(),
            range,
            week_start,
        }
    }

    pub fn from_config(config: &Config, today: NaiveDate) -> Self {
        Self::new(today, config.supported_range(), config.week_start)
    }

    pub fn with_selected(self, date: DateKey) -> Result<Self> {
        self.select_date(date)
    }

    pub fn cursor(&self) -> &CalendarCursor {
        &self.cursor
    }

    pub fn selected(&self) -> DateKey {
        self.selected
    }

    pub fn today(&self) -> DateKey {
        self.today
    }

    pub fn agenda(&self) -> &Agenda {
        &self.agenda
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn selected_events(&self) -> &[Event] {
        self.agenda.events_of_day(&self.selected)
    }

    pub fn grid(&self) -> MonthGrid<'_> {
        month_grid(
            &self.cursor,
            self.week_start,
            &self.agenda,
            self.today,
            self.selected,
        )
    }

    pub fn refresh_today(&self, today: NaiveDate) -> Context {
        Context {
            today: to_key(&today),
            ..self.clone()
        }
    }

    pub fn apply<G: IdGenerator>(&self, action: Action, ids: &mut G) -> Result<Context> {
        log::debug!("Applying {:?}", action);

        let result = match action {
            Action::SelectDay(day) => self.select_day(day),
            Action::PreviousMonth => self.move_to(self.cursor.pred()),
            Action::NextMonth => self.move_to(self.cursor.succ()),
            Action::AddEvent { title, date } => self.add_event(&title, date, ids),
            Action::OpenForm => Ok(Context {
                form: Form {
                    open: true,
                    ..self.form.clone()
                },
                ..self.clone()
            }),
            Action::CloseForm => Ok(Context {
                form: Form {
                    open: false,
                    ..self.form.clone()
                },
                ..self.clone()
            }),
            Action::EditTitle(title) => Ok(Context {
                form: Form {
                    title,
                    ..self.form.clone()
                },
                ..self.clone()
            }),
            Action::SetFormDate(date) => self.select_date(date),
            Action::SubmitForm => self.add_event(&self.form.title, self.selected, ids),
            Action::GoToday => self.select_date(self.today),
        };

        if let Err(err) = &result {
            log::warn!("Rejected action: {}", err);
        }

        result
    }

    fn select_day(&self, day: u32) -> Result<Context> {
        let date = self.cursor.day(day).ok_or_else(|| {
            Error::new(
                ErrorKind::DateParse,
                &format!("{} has no day {}", self.cursor, day),
            )
        })?;
        self.range.check(&date)?;

        Ok(Context {
            selected: to_key(&date),
            ..self.clone()
        })
    }

    fn select_date(&self, date: DateKey) -> Result<Context> {
        self.range.check(&date.date())?;

        Ok(Context {
            cursor: CalendarCursor::of(&date.date()),
            selected: date,
            ..self.clone()
        })
    }

    fn move_to(&self, cursor: CalendarCursor) -> Result<Context> {
        self.range.check_month(&cursor)?;

        Ok(Context {
            cursor,
            ..self.clone()
        })
    }

    fn add_event<G: IdGenerator>(
        &self,
        title: &str,
        date: DateKey,
        ids: &mut G,
    ) -> Result<Context> {
        self.range.check(&date.date())?;
        let agenda = self.agenda.add_event(date, title, ids)?;
        log::debug!("Agenda now holds {} events", agenda.len());

        Ok(Context {
            agenda,
            form: Form::default(),
            ..self.clone()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Month;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn key(s: &str) -> DateKey {
        s.parse().unwrap()
    }

    fn context_on(y: i32, m: u32, d: u32) -> Context {
        Context::new(date(y, m, d), SupportedRange::default(), WeekStart::Sunday)
    }

    #[test]
    fn starts_on_today() {
        let ctx = context_on(2024, 5, 17);

        assert_eq!(*ctx.cursor(), CalendarCursor::new(Month::May, 2024));
        assert_eq!(ctx.selected(), key("2024-05-17"));
        assert_eq!(ctx.today(), key("2024-05-17"));
        assert!(!ctx.form().open);
    }

    #[test]
    fn navigates_months() {
        let mut ids = SequentialIds::default();
        let ctx = context_on(2024, 12, 3);

        let next = ctx.apply(Action::NextMonth, &mut ids).unwrap();
        assert_eq!(*next.cursor(), CalendarCursor::new(Month::January, 2025));
        // navigation leaves the selection alone
        assert_eq!(next.selected(), ctx.selected());

        let back = next.apply(Action::PreviousMonth, &mut ids).unwrap();
        assert_eq!(back.cursor(), ctx.cursor());
    }

    #[test]
    fn previous_from_lower_bound_is_rejected() {
        let mut ids = SequentialIds::default();
        let ctx = context_on(1970, 1, 15);

        let err = ctx.apply(Action::PreviousMonth, &mut ids).unwrap_err();
        assert!(err.is_out_of_range());
        assert_eq!(*ctx.cursor(), CalendarCursor::new(Month::January, 1970));
    }

    #[test]
    fn next_from_upper_bound_is_rejected() {
        let mut ids = SequentialIds::default();
        let ctx = context_on(2200, 12, 1);

        let err = ctx.apply(Action::NextMonth, &mut ids).unwrap_err();
        assert!(err.is_out_of_range());
        assert_eq!(*ctx.cursor(), CalendarCursor::new(Month::December, 2200));
    }

    #[test]
    fn selecting_a_day_keeps_the_agenda() {
        let mut ids = SequentialIds::default();
        let ctx = context_on(2024, 5, 17)
            .apply(
                Action::AddEvent {
                    title: "Standup".to_owned(),
                    date: key("2024-05-01"),
                },
                &mut ids,
            )
            .unwrap();

        let selected = ctx.apply(Action::SelectDay(1), &mut ids).unwrap();
        assert_eq!(selected.selected(), key("2024-05-01"));
        assert_eq!(selected.agenda(), ctx.agenda());
        assert_eq!(selected.selected_events().len(), 1);
    }

    #[test]
    fn selecting_a_missing_day_fails() {
        let mut ids = SequentialIds::default();
        let ctx = context_on(2023, 2, 1);

        for day in [0, 29, 32] {
            let err = ctx.apply(Action::SelectDay(day), &mut ids).unwrap_err();
            assert!(matches!(err.kind, ErrorKind::DateParse));
        }
    }

    #[test]
    fn form_flow() {
        let mut ids = SequentialIds::default();
        let ctx = context_on(2024, 5, 17);

        let ctx = [
            Action::OpenForm,
            Action::EditTitle("Dentist".to_owned()),
            Action::SetFormDate(key("2024-06-03")),
        ]
        .iter()
        .cloned()
        .try_fold(ctx, |ctx, action| ctx.apply(action, &mut ids))
        .unwrap();

        assert!(ctx.form().open);
        assert_eq!(*ctx.cursor(), CalendarCursor::new(Month::June, 2024));

        let submitted = ctx.apply(Action::SubmitForm, &mut ids).unwrap();
        assert_eq!(submitted.form(), &Form::default());
        assert_eq!(
            submitted.agenda().events_of_day(&key("2024-06-03"))[0].title(),
            "Dentist"
        );
    }

    #[test]
    fn failed_submit_keeps_the_draft() {
        let mut ids = SequentialIds::default();
        let day = key("2024-05-17");
        let mut ctx = context_on(2024, 5, 17);
        for title in ["a", "b", "c"] {
            ctx = ctx
                .apply(
                    Action::AddEvent {
                        title: title.to_owned(),
                        date: day,
                    },
                    &mut ids,
                )
                .unwrap();
        }

        let drafted = ctx
            .apply(Action::OpenForm, &mut ids)
            .and_then(|c| c.apply(Action::EditTitle("d".to_owned()), &mut ids))
            .unwrap();
        let err = drafted.apply(Action::SubmitForm, &mut ids).unwrap_err();

        assert!(err.is_capacity_exceeded());
        assert_eq!(drafted.form().title, "d");
        assert_eq!(drafted.selected_events().len(), 3);
    }

    #[test]
    fn events_outside_range_are_rejected() {
        let mut ids = SequentialIds::default();
        let ctx = context_on(2024, 5, 17);

        let err = ctx
            .apply(
                Action::AddEvent {
                    title: "Moon landing".to_owned(),
                    date: key("1969-07-20"),
                },
                &mut ids,
            )
            .unwrap_err();
        assert!(err.is_out_of_range());
        assert!(ctx.agenda().is_empty());

        let err = ctx
            .apply(Action::SetFormDate(key("2201-01-01")), &mut ids)
            .unwrap_err();
        assert!(err.is_out_of_range());
    }

    #[test]
    fn go_today_returns_cursor_and_selection() {
        let mut ids = SequentialIds::default();
        let ctx = context_on(2024, 5, 17)
            .with_selected(key("2030-01-01"))
            .unwrap();
        assert_eq!(*ctx.cursor(), CalendarCursor::new(Month::January, 2030));

        let back = ctx.apply(Action::GoToday, &mut ids).unwrap();
        assert_eq!(back.selected(), key("2024-05-17"));
        assert_eq!(*back.cursor(), CalendarCursor::new(Month::May, 2024));
    }

    #[test]
    fn refreshing_today_only_moves_the_marker() {
        let ctx = context_on(2024, 5, 31);
        let tomorrow = ctx.refresh_today(date(2024, 6, 1));

        assert_eq!(tomorrow.today(), key("2024-06-01"));
        assert_eq!(tomorrow.cursor(), ctx.cursor());
        assert_eq!(tomorrow.selected(), ctx.selected());
    }

    #[test]
    fn today_outside_of_range_starts_on_nearest_day() {
        let mut ids = SequentialIds::default();
        let range = SupportedRange::new(key("2000-01-01"), key("2010-12-31")).unwrap();
        let ctx = Context::new(date(2026, 10, 16), range, WeekStart::Sunday);

        assert_eq!(ctx.selected(), key("2010-12-31"));
        assert_eq!(ctx.today(), key("2026-10-16"));
        assert_eq!(*ctx.cursor(), CalendarCursor::new(Month::December, 2010));

        let prev = ctx.apply(Action::PreviousMonth, &mut ids).unwrap();
        assert_eq!(*prev.cursor(), CalendarCursor::new(Month::November, 2010));
        assert!(ctx.apply(Action::NextMonth, &mut ids).is_err());

        let added = ctx
            .apply(
                Action::AddEvent {
                    title: "Archive".to_owned(),
                    date: ctx.selected(),
                },
                &mut ids,
            )
            .unwrap();
        assert_eq!(added.selected_events().len(), 1);

        let early = Context::new(date(1990, 3, 3), range, WeekStart::Sunday);
        assert_eq!(early.selected(), key("2000-01-01"));
    }
}
