//! In-memory repositories with the same contracts as the Postgres ones.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::app::Repositories;
use crate::database::models::{
    Calendar, CalendarInput, Event, EventUpdate, NewEvent, NewUser, Project, ProjectInput, Task, TaskInput,
    TaskStatus, User,
};
use crate::database::{
    CalendarRepository, DatabaseError, EventRepository, ProjectRepository, TaskRepository, UserRepository,
};
use crate::ownership::ParentLookup;
use crate::UserId;

#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<HashMap<Uuid, User>>,
    calendars: Mutex<HashMap<Uuid, Calendar>>,
    events: Mutex<HashMap<Uuid, Event>>,
    projects: Mutex<HashMap<Uuid, Project>>,
    tasks: Mutex<HashMap<Uuid, Task>>,
}

impl MemoryStore {
    pub fn repositories(self: &Arc<Self>) -> Repositories {
        Repositories {
            users: Arc::new(MemoryUsers(self.clone())),
            calendars: Arc::new(MemoryCalendars(self.clone())),
            events: Arc::new(MemoryEvents(self.clone())),
            projects: Arc::new(MemoryProjects(self.clone())),
            tasks: Arc::new(MemoryTasks(self.clone())),
        }
    }

    pub fn has_calendar(&self, id: Uuid) -> bool {
        self.calendars.lock().unwrap().contains_key(&id)
    }

    pub fn has_event(&self, id: Uuid) -> bool {
        self.events.lock().unwrap().contains_key(&id)
    }

    pub fn has_project(&self, id: Uuid) -> bool {
        self.projects.lock().unwrap().contains_key(&id)
    }

    pub fn has_task(&self, id: Uuid) -> bool {
        self.tasks.lock().unwrap().contains_key(&id)
    }

    pub fn project_count(&self) -> usize {
        self.projects.lock().unwrap().len()
    }
}

fn sorted_by<T, K: Ord>(mut items: Vec<T>, key: impl Fn(&T) -> K) -> Vec<T> {
    items.sort_by_key(|item| key(item));
    items
}

struct MemoryUsers(Arc<MemoryStore>);

#[async_trait]
impl UserRepository for MemoryUsers {
    async fn create(&self, user: NewUser) -> Result<User, DatabaseError> {
        let mut users = self.0.users.lock().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Err(DatabaseError::Conflict("user with this email already exists".to_string()));
        }
        let user = User {
            id: Uuid::new_v4(),
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        Ok(self.0.users.lock().unwrap().values().find(|u| u.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DatabaseError> {
        Ok(self.0.users.lock().unwrap().get(&id).cloned())
    }
}

struct MemoryCalendars(Arc<MemoryStore>);

#[async_trait]
impl ParentLookup for MemoryCalendars {
    fn parent_kind(&self) -> &'static str {
        "calendar"
    }

    async fn owner_of(&self, parent_id: Uuid) -> Result<Option<UserId>, DatabaseError> {
        Ok(self.0.calendars.lock().unwrap().get(&parent_id).map(|c| c.user_id))
    }
}

#[async_trait]
impl CalendarRepository for MemoryCalendars {
    async fn create(&self, user_id: UserId, input: &CalendarInput) -> Result<Calendar, DatabaseError> {
        let now = Utc::now();
        let calendar = Calendar {
            id: Uuid::new_v4(),
            user_id,
            name: input.name.clone(),
            description: input.description.clone(),
            color: input.color.clone(),
            created_at: now,
            updated_at: now,
        };
        self.0.calendars.lock().unwrap().insert(calendar.id, calendar.clone());
        Ok(calendar)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Calendar>, DatabaseError> {
        Ok(self.0.calendars.lock().unwrap().get(&id).cloned())
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Calendar>, DatabaseError> {
        let calendars = self.0.calendars.lock().unwrap();
        let mine: Vec<Calendar> = calendars.values().filter(|c| c.user_id == user_id).cloned().collect();
        Ok(sorted_by(mine, |c: &Calendar| c.created_at))
    }

    async fn update(
        &self,
        id: Uuid,
        user_id: UserId,
        input: &CalendarInput,
    ) -> Result<Option<Calendar>, DatabaseError> {
        let mut calendars = self.0.calendars.lock().unwrap();
        Ok(calendars.get_mut(&id).filter(|c| c.user_id == user_id).map(|c| {
            c.name = input.name.clone();
            c.description = input.description.clone();
            c.color = input.color.clone();
            c.updated_at = Utc::now();
            c.clone()
        }))
    }

    async fn delete(&self, id: Uuid, user_id: UserId) -> Result<bool, DatabaseError> {
        let mut calendars = self.0.calendars.lock().unwrap();
        if !calendars.get(&id).is_some_and(|c| c.user_id == user_id) {
            return Ok(false);
        }
        self.0.events.lock().unwrap().retain(|_, e| e.calendar_id != id);
        calendars.remove(&id);
        Ok(true)
    }
}

struct MemoryEvents(Arc<MemoryStore>);

#[async_trait]
impl EventRepository for MemoryEvents {
    async fn create(&self, user_id: UserId, event: &NewEvent) -> Result<Event, DatabaseError> {
        let now = Utc::now();
        let event = Event {
            id: Uuid::new_v4(),
            calendar_id: event.calendar_id,
            user_id,
            title: event.title.trim().to_string(),
            description: event.description.clone(),
            start_time: event.start_time,
            end_time: event.end_time,
            location: event.location.clone(),
            color: event.color.clone(),
            created_at: now,
            updated_at: now,
        };
        self.0.events.lock().unwrap().insert(event.id, event.clone());
        Ok(event)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Event>, DatabaseError> {
        Ok(self.0.events.lock().unwrap().get(&id).cloned())
    }

    async fn list(
        &self,
        user_id: UserId,
        calendar_ids: &[Uuid],
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Event>, DatabaseError> {
        let events = self.0.events.lock().unwrap();
        let found: Vec<Event> = events
            .values()
            .filter(|e| e.user_id == user_id && calendar_ids.contains(&e.calendar_id))
            .filter(|e| e.start_time < end && e.end_time > start)
            .cloned()
            .collect();
        Ok(sorted_by(found, |e: &Event| e.start_time))
    }

    async fn update(
        &self,
        id: Uuid,
        user_id: UserId,
        update: &EventUpdate,
    ) -> Result<Option<Event>, DatabaseError> {
        let mut events = self.0.events.lock().unwrap();
        Ok(events.get_mut(&id).filter(|e| e.user_id == user_id).map(|e| {
            e.title = update.title.trim().to_string();
            e.description = update.description.clone();
            e.start_time = update.start_time;
            e.end_time = update.end_time;
            e.location = update.location.clone();
            e.color = update.color.clone();
            e.updated_at = Utc::now();
            e.clone()
        }))
    }

    async fn delete(&self, id: Uuid, user_id: UserId) -> Result<bool, DatabaseError> {
        let mut events = self.0.events.lock().unwrap();
        if !events.get(&id).is_some_and(|e| e.user_id == user_id) {
            return Ok(false);
        }
        events.remove(&id);
        Ok(true)
    }
}

struct MemoryProjects(Arc<MemoryStore>);

#[async_trait]
impl ParentLookup for MemoryProjects {
    fn parent_kind(&self) -> &'static str {
        "project"
    }

    async fn owner_of(&self, parent_id: Uuid) -> Result<Option<UserId>, DatabaseError> {
        Ok(self.0.projects.lock().unwrap().get(&parent_id).map(|p| p.user_id))
    }
}

#[async_trait]
impl ProjectRepository for MemoryProjects {
    async fn create(&self, user_id: UserId, input: &ProjectInput) -> Result<Project, DatabaseError> {
        let now = Utc::now();
        let project = Project {
            id: Uuid::new_v4(),
            user_id,
            name: input.name.trim().to_string(),
            description: input.description.clone(),
            created_at: now,
            updated_at: now,
        };
        self.0.projects.lock().unwrap().insert(project.id, project.clone());
        Ok(project)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Project>, DatabaseError> {
        Ok(self.0.projects.lock().unwrap().get(&id).cloned())
    }

    async fn list_by_user(&self, user_id: UserId) -> Result<Vec<Project>, DatabaseError> {
        let projects = self.0.projects.lock().unwrap();
        let mine: Vec<Project> = projects.values().filter(|p| p.user_id == user_id).cloned().collect();
        Ok(sorted_by(mine, |p: &Project| std::cmp::Reverse(p.created_at)))
    }

    async fn update(
        &self,
        id: Uuid,
        user_id: UserId,
        input: &ProjectInput,
    ) -> Result<Option<Project>, DatabaseError> {
        let mut projects = self.0.projects.lock().unwrap();
        Ok(projects.get_mut(&id).filter(|p| p.user_id == user_id).map(|p| {
            p.name = input.name.trim().to_string();
            p.description = input.description.clone();
            p.updated_at = Utc::now();
            p.clone()
        }))
    }

    async fn delete_cascade(&self, id: Uuid, user_id: UserId) -> Result<bool, DatabaseError> {
        let mut projects = self.0.projects.lock().unwrap();
        if !projects.get(&id).is_some_and(|p| p.user_id == user_id) {
            return Ok(false);
        }
        self.0.tasks.lock().unwrap().retain(|_, t| t.project_id != id);
        projects.remove(&id);
        Ok(true)
    }
}

struct MemoryTasks(Arc<MemoryStore>);

#[async_trait]
impl TaskRepository for MemoryTasks {
    async fn create(&self, project_id: Uuid, input: &TaskInput) -> Result<Task, DatabaseError> {
        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            project_id,
            title: input.title.trim().to_string(),
            description: input.description.clone(),
            status: input.status,
            label: input.label,
            priority: input.priority,
            due_date: input.due_date,
            created_at: now,
            updated_at: now,
        };
        self.0.tasks.lock().unwrap().insert(task.id, task.clone());
        Ok(task)
    }

    async fn get(&self, id: Uuid) -> Result<Option<Task>, DatabaseError> {
        Ok(self.0.tasks.lock().unwrap().get(&id).cloned())
    }

    async fn list_by_project(&self, project_id: Uuid) -> Result<Vec<Task>, DatabaseError> {
        let tasks = self.0.tasks.lock().unwrap();
        let found: Vec<Task> = tasks.values().filter(|t| t.project_id == project_id).cloned().collect();
        Ok(sorted_by(found, |t: &Task| t.created_at))
    }

    async fn update(
        &self,
        id: Uuid,
        project_id: Uuid,
        input: &TaskInput,
    ) -> Result<Option<Task>, DatabaseError> {
        let mut tasks = self.0.tasks.lock().unwrap();
        Ok(tasks.get_mut(&id).filter(|t| t.project_id == project_id).map(|t| {
            t.title = input.title.trim().to_string();
            t.description = input.description.clone();
            t.status = input.status;
            t.label = input.label;
            t.priority = input.priority;
            t.due_date = input.due_date;
            t.updated_at = Utc::now();
            t.clone()
        }))
    }

    async fn update_status(&self, id: Uuid, status: TaskStatus) -> Result<Option<Task>, DatabaseError> {
        let mut tasks = self.0.tasks.lock().unwrap();
        Ok(tasks.get_mut(&id).map(|t| {
            t.status = status;
            t.updated_at = Utc::now();
            t.clone()
        }))
    }

    async fn delete(&self, id: Uuid) -> Result<bool, DatabaseError> {
        Ok(self.0.tasks.lock().unwrap().remove(&id).is_some())
    }
}
