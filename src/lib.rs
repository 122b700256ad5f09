pub mod configuration;

pub mod manager {
    pub mod namedobject;
    pub mod managererror;
    pub mod manager;
}

pub mod time {
    pub mod utility;
    pub mod datekey;

    pub mod recurringholiday {
        pub mod recurringholiday;
        pub mod weekendadjustment;
        pub mod fixeddateholiday;
        pub mod easterrelatedholiday;
        pub mod weekdayonorafterholiday;
        pub mod weeklyholiday;
        pub mod rulebook;
        pub mod recurringholidaymanager;
    }

    pub mod calendar {
        pub mod holidayerror;
        pub mod holidaymap;
        pub mod holidayrules;
        pub mod holidayupdate;
        pub mod holidaycalendar;
        pub mod holidayset;
        pub mod combinedholidayset;
        pub mod holidaysetfactory;
        pub mod holidaysetmanager;
    }

    pub mod calendars {
        pub mod sweden;
    }
}
