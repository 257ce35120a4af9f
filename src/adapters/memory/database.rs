//! Vector-backed implementation of the persistence ports.

use async_trait::async_trait;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use crate::domain::academic_cycle::{AcademicCycle, CycleName};
use crate::domain::account::{Account, Username};
use crate::domain::attendance::{
    AttendanceRecord, AttendanceStatistics, AttendanceStatus, DailyAttendanceRow, GroupAbsences,
    StatusCount, StudentCount,
};
use crate::domain::foundation::{
    AccountId, CycleId, DomainError, ErrorCode, GroupId, PlanningDocumentId, Role, StudentId,
};
use crate::domain::planning::{PeriodLabel, PlanningDocument, TeacherRef};
use crate::domain::school::{
    Group, GroupAssignmentRow, HistoryEntry, Student, StudentDocument, TeacherAssignment,
};
use crate::ports::{
    AccountRepository, AttendanceRepository, CycleRepository, GroupRepository, PlanningReader,
    PlanningRepository, RecentDocument, StudentRepository, TeacherFolder,
};

#[derive(Default)]
struct Tables {
    cycles: Vec<AcademicCycle>,
    accounts: Vec<Account>,
    documents: Vec<PlanningDocument>,
    groups: Vec<Group>,
    students: Vec<Student>,
    attendance: Vec<AttendanceRecord>,
    student_documents: Vec<StudentDocument>,
    history: Vec<HistoryEntry>,
}

impl Tables {
    fn account_name(&self, id: AccountId) -> Option<String> {
        self.accounts
            .iter()
            .find(|a| a.id() == id)
            .map(|a| a.full_name().to_string())
    }

    fn student_with_group(&self, id: StudentId) -> Option<(&Student, &Group)> {
        let student = self.students.iter().find(|s| s.id() == id)?;
        let group = self.groups.iter().find(|g| g.id() == student.group_id())?;
        Some((student, group))
    }

    fn top_students(&self, status: AttendanceStatus, top: usize) -> Vec<StudentCount> {
        let mut counts: HashMap<StudentId, i64> = HashMap::new();
        for record in self.attendance.iter().filter(|r| r.status() == status) {
            *counts.entry(record.student_id()).or_default() += 1;
        }
        let mut ranked: Vec<StudentCount> = counts
            .into_iter()
            .filter_map(|(id, total)| {
                let (student, group) = self.student_with_group(id)?;
                Some(StudentCount {
                    student_id: id,
                    student_name: student.full_name().to_string(),
                    group_label: group.label(),
                    total,
                })
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.total
                .cmp(&a.total)
                .then_with(|| a.student_name.cmp(&b.student_name))
        });
        ranked.truncate(top);
        ranked
    }
}

/// In-memory store implementing all repository ports.
#[derive(Default)]
pub struct InMemoryDatabase {
    tables: Mutex<Tables>,
    fail_writes: AtomicBool,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent write fail with a database error.
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Seeds an account (Director bootstrap, test fixtures).
    pub fn insert_account(&self, account: Account) {
        self.lock().accounts.push(account);
    }

    /// Seeds a group.
    pub fn insert_group(&self, group: Group) {
        self.lock().groups.push(group);
    }

    /// Seeds an attendance record as a check-in device would.
    pub fn insert_attendance(&self, record: AttendanceRecord) {
        self.lock().attendance.push(record);
    }

    pub fn active_cycle_count(&self) -> usize {
        self.lock().cycles.iter().filter(|c| c.is_active()).count()
    }

    pub fn document_count(&self) -> usize {
        self.lock().documents.len()
    }

    pub fn attendance_count(&self) -> usize {
        self.lock().attendance.len()
    }

    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn check_writable(&self, context: &str) -> Result<(), DomainError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DomainError::new(
                ErrorCode::DatabaseError,
                format!("{}: simulated failure", context),
            ));
        }
        Ok(())
    }
}

fn already_exists(what: impl std::fmt::Display) -> DomainError {
    DomainError::new(ErrorCode::AlreadyExists, format!("{} already exists", what))
}

// ════════════════════════════════════════════════════════════════════════════════
// Cycles
// ════════════════════════════════════════════════════════════════════════════════

#[async_trait]
impl CycleRepository for InMemoryDatabase {
    async fn save(&self, cycle: &AcademicCycle) -> Result<(), DomainError> {
        self.check_writable("Failed to save cycle")?;
        let mut tables = self.lock();
        if tables.cycles.iter().any(|c| c.name() == cycle.name()) {
            return Err(already_exists(cycle.name()));
        }
        tables.cycles.push(cycle.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &CycleId) -> Result<Option<AcademicCycle>, DomainError> {
        Ok(self.lock().cycles.iter().find(|c| c.id() == *id).cloned())
    }

    async fn find_by_name(&self, name: &CycleName) -> Result<Option<AcademicCycle>, DomainError> {
        Ok(self.lock().cycles.iter().find(|c| c.name() == name).cloned())
    }

    async fn find_active(&self) -> Result<Option<AcademicCycle>, DomainError> {
        Ok(self.lock().cycles.iter().find(|c| c.is_active()).cloned())
    }

    async fn list(&self) -> Result<Vec<AcademicCycle>, DomainError> {
        let mut cycles = self.lock().cycles.clone();
        cycles.reverse();
        cycles.sort_by(|a, b| b.created_at().cmp(a.created_at()));
        Ok(cycles)
    }

    async fn activate(&self, id: &CycleId) -> Result<(), DomainError> {
        self.check_writable("Failed to activate cycle")?;
        let mut tables = self.lock();
        if !tables.cycles.iter().any(|c| c.id() == *id) {
            return Err(DomainError::new(
                ErrorCode::CycleNotFound,
                format!("Cycle not found: {}", id),
            ));
        }
        for cycle in tables.cycles.iter_mut() {
            let active = cycle.id() == *id;
            cycle.set_active(active);
        }
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Planning documents
// ════════════════════════════════════════════════════════════════════════════════

#[async_trait]
impl PlanningRepository for InMemoryDatabase {
    async fn save(&self, document: &PlanningDocument) -> Result<(), DomainError> {
        self.check_writable("Failed to save planning document")?;
        self.lock().documents.push(document.clone());
        Ok(())
    }

    async fn update_review(&self, document: &PlanningDocument) -> Result<(), DomainError> {
        self.check_writable("Failed to update planning review")?;
        let mut tables = self.lock();
        match tables.documents.iter_mut().find(|d| d.id() == document.id()) {
            Some(stored) => {
                *stored = document.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::DocumentNotFound,
                format!("Planning document not found: {}", document.id()),
            )),
        }
    }

    async fn find_by_id(
        &self,
        id: &PlanningDocumentId,
    ) -> Result<Option<PlanningDocument>, DomainError> {
        Ok(self.lock().documents.iter().find(|d| d.id() == *id).cloned())
    }
}

fn newest_first(docs: &mut [PlanningDocument]) {
    docs.sort_by(|a, b| b.uploaded_at().cmp(a.uploaded_at()));
}

#[async_trait]
impl PlanningReader for InMemoryDatabase {
    async fn list_for_cycle_period(
        &self,
        cycle: &CycleName,
        period: &PeriodLabel,
    ) -> Result<Vec<PlanningDocument>, DomainError> {
        let mut docs: Vec<_> = self
            .lock()
            .documents
            .iter()
            .filter(|d| d.belongs_to(cycle, period))
            .cloned()
            .collect();
        newest_first(&mut docs);
        Ok(docs)
    }

    async fn list_for_teacher(
        &self,
        teacher: &AccountId,
        cycle: &CycleName,
        period: Option<&PeriodLabel>,
        limit: usize,
    ) -> Result<Vec<PlanningDocument>, DomainError> {
        let mut docs: Vec<_> = self
            .lock()
            .documents
            .iter()
            .filter(|d| d.teacher_id() == *teacher && d.cycle() == cycle)
            .filter(|d| period.map_or(true, |p| d.period() == p))
            .cloned()
            .collect();
        newest_first(&mut docs);
        if period.is_none() {
            docs.truncate(limit);
        }
        Ok(docs)
    }

    async fn teacher_folders(&self, cycle: &CycleName) -> Result<Vec<TeacherFolder>, DomainError> {
        let tables = self.lock();
        let mut folders: Vec<TeacherFolder> = tables
            .accounts
            .iter()
            .filter(|a| a.role() == Role::Maestro)
            .map(|a| TeacherFolder {
                teacher: TeacherRef {
                    id: a.id(),
                    full_name: a.full_name().to_string(),
                },
                document_count: tables
                    .documents
                    .iter()
                    .filter(|d| d.teacher_id() == a.id() && d.cycle() == cycle)
                    .count() as i64,
            })
            .collect();
        folders.sort_by(|a, b| a.teacher.full_name.cmp(&b.teacher.full_name));
        Ok(folders)
    }

    async fn recent_for_cycle(
        &self,
        cycle: &CycleName,
        limit: usize,
    ) -> Result<Vec<RecentDocument>, DomainError> {
        let tables = self.lock();
        let mut docs: Vec<_> = tables
            .documents
            .iter()
            .filter(|d| d.cycle() == cycle)
            .cloned()
            .collect();
        newest_first(&mut docs);
        Ok(docs
            .into_iter()
            .filter_map(|d| {
                let teacher_name = tables.account_name(d.teacher_id())?;
                Some(RecentDocument {
                    document: d,
                    teacher_name,
                })
            })
            .take(limit)
            .collect())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Accounts
// ════════════════════════════════════════════════════════════════════════════════

#[async_trait]
impl AccountRepository for InMemoryDatabase {
    async fn save(&self, account: &Account) -> Result<(), DomainError> {
        self.check_writable("Failed to save account")?;
        let mut tables = self.lock();
        if tables.accounts.iter().any(|a| a.username() == account.username()) {
            return Err(already_exists(account.username()));
        }
        tables.accounts.push(account.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &AccountId) -> Result<Option<Account>, DomainError> {
        Ok(self.lock().accounts.iter().find(|a| a.id() == *id).cloned())
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<Account>, DomainError> {
        Ok(self
            .lock()
            .accounts
            .iter()
            .find(|a| a.username() == username)
            .cloned())
    }

    async fn update_password(&self, account: &Account) -> Result<(), DomainError> {
        self.check_writable("Failed to update password")?;
        let mut tables = self.lock();
        match tables.accounts.iter_mut().find(|a| a.id() == account.id()) {
            Some(stored) => {
                *stored = account.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::AccountNotFound,
                format!("Account not found: {}", account.id()),
            )),
        }
    }

    async fn list_teachers(&self) -> Result<Vec<TeacherRef>, DomainError> {
        let mut teachers: Vec<TeacherRef> = self
            .lock()
            .accounts
            .iter()
            .filter(|a| a.role() == Role::Maestro)
            .map(|a| TeacherRef {
                id: a.id(),
                full_name: a.full_name().to_string(),
            })
            .collect();
        teachers.sort_by(|a, b| a.full_name.cmp(&b.full_name));
        Ok(teachers)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Attendance
// ════════════════════════════════════════════════════════════════════════════════

#[async_trait]
impl AttendanceRepository for InMemoryDatabase {
    async fn justify(&self, record: &AttendanceRecord) -> Result<AttendanceRecord, DomainError> {
        self.check_writable("Failed to justify attendance")?;
        let mut tables = self.lock();
        if !tables.students.iter().any(|s| s.id() == record.student_id()) {
            return Err(DomainError::new(
                ErrorCode::StudentNotFound,
                format!("Student not found: {}", record.student_id()),
            ));
        }
        if let Some(existing) = tables
            .attendance
            .iter_mut()
            .find(|r| r.student_id() == record.student_id() && r.date() == record.date())
        {
            existing.justify();
            return Ok(existing.clone());
        }
        let mut inserted = record.clone();
        inserted.justify();
        tables.attendance.push(inserted.clone());
        Ok(inserted)
    }

    async fn daily_report(&self, date: NaiveDate) -> Result<Vec<DailyAttendanceRow>, DomainError> {
        let tables = self.lock();
        let mut rows: Vec<DailyAttendanceRow> = tables
            .attendance
            .iter()
            .filter(|r| r.date() == date)
            .filter_map(|r| {
                let (student, group) = tables.student_with_group(r.student_id())?;
                Some(DailyAttendanceRow {
                    student_id: r.student_id(),
                    student_name: student.full_name().to_string(),
                    group_label: group.label(),
                    check_in: r.check_in(),
                    status: r.status(),
                })
            })
            .collect();
        rows.sort_by(|a, b| b.check_in.cmp(&a.check_in));
        Ok(rows)
    }

    async fn statistics(&self, top: usize) -> Result<AttendanceStatistics, DomainError> {
        let tables = self.lock();

        let mut by_status: Vec<StatusCount> = AttendanceStatus::ALL
            .iter()
            .map(|status| StatusCount {
                status: *status,
                total: tables
                    .attendance
                    .iter()
                    .filter(|r| r.status() == *status)
                    .count() as i64,
            })
            .filter(|c| c.total > 0)
            .collect();
        by_status.sort_by(|a, b| a.status.as_str().cmp(b.status.as_str()));

        let mut per_group: HashMap<GroupId, i64> = HashMap::new();
        for record in tables
            .attendance
            .iter()
            .filter(|r| r.status() == AttendanceStatus::Falta)
        {
            if let Some((_, group)) = tables.student_with_group(record.student_id()) {
                *per_group.entry(group.id()).or_default() += 1;
            }
        }
        let mut absences_by_group: Vec<GroupAbsences> = per_group
            .into_iter()
            .filter_map(|(id, total)| {
                let group = tables.groups.iter().find(|g| g.id() == id)?;
                Some(GroupAbsences {
                    group_id: id,
                    group_label: group.label(),
                    total,
                })
            })
            .collect();
        absences_by_group.sort_by(|a, b| {
            b.total
                .cmp(&a.total)
                .then_with(|| a.group_label.cmp(&b.group_label))
        });

        Ok(AttendanceStatistics {
            by_status,
            absences_by_group,
            top_absences: tables.top_students(AttendanceStatus::Falta, top),
            top_tardies: tables.top_students(AttendanceStatus::Retardo, top),
        })
    }

    async fn find(
        &self,
        student: &StudentId,
        date: NaiveDate,
    ) -> Result<Option<AttendanceRecord>, DomainError> {
        Ok(self
            .lock()
            .attendance
            .iter()
            .find(|r| r.student_id() == *student && r.date() == date)
            .cloned())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Groups and students
// ════════════════════════════════════════════════════════════════════════════════

#[async_trait]
impl GroupRepository for InMemoryDatabase {
    async fn find_by_id(&self, id: &GroupId) -> Result<Option<Group>, DomainError> {
        Ok(self.lock().groups.iter().find(|g| g.id() == *id).cloned())
    }

    async fn list_assignments(&self) -> Result<Vec<GroupAssignmentRow>, DomainError> {
        let tables = self.lock();
        let mut groups = tables.groups.clone();
        groups.sort_by(|a, b| (a.grade(), a.letter()).cmp(&(b.grade(), b.letter())));
        Ok(groups
            .iter()
            .map(|g| GroupAssignmentRow {
                group_id: g.id(),
                label: g.label(),
                teacher_id: g.teacher_id(),
                teacher_name: g.teacher_id().and_then(|t| tables.account_name(t)),
            })
            .collect())
    }

    async fn save_assignments(&self, assignments: &[TeacherAssignment]) -> Result<(), DomainError> {
        self.check_writable("Failed to assign teacher")?;
        let mut tables = self.lock();
        for assignment in assignments {
            if !tables.groups.iter().any(|g| g.id() == assignment.group_id) {
                return Err(DomainError::new(
                    ErrorCode::GroupNotFound,
                    format!("Group not found: {}", assignment.group_id),
                ));
            }
            if !tables.accounts.iter().any(|a| a.id() == assignment.teacher_id) {
                return Err(DomainError::new(
                    ErrorCode::AccountNotFound,
                    format!("Teacher not found: {}", assignment.teacher_id),
                ));
            }
        }
        for assignment in assignments {
            if let Some(group) = tables
                .groups
                .iter_mut()
                .find(|g| g.id() == assignment.group_id)
            {
                group.assign_teacher(assignment.teacher_id);
            }
        }
        Ok(())
    }
}

#[async_trait]
impl StudentRepository for InMemoryDatabase {
    async fn save(&self, student: &Student, entry: &HistoryEntry) -> Result<(), DomainError> {
        self.check_writable("Failed to save student")?;
        let mut tables = self.lock();
        if tables.students.iter().any(|s| s.curp() == student.curp()) {
            return Err(already_exists(student.curp()));
        }
        if !tables.groups.iter().any(|g| g.id() == student.group_id()) {
            return Err(DomainError::new(
                ErrorCode::GroupNotFound,
                format!("Group not found: {}", student.group_id()),
            ));
        }
        tables.students.push(student.clone());
        tables.history.push(entry.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: &StudentId) -> Result<Option<Student>, DomainError> {
        Ok(self.lock().students.iter().find(|s| s.id() == *id).cloned())
    }

    async fn list_by_group(&self, group: &GroupId) -> Result<Vec<Student>, DomainError> {
        let mut students: Vec<Student> = self
            .lock()
            .students
            .iter()
            .filter(|s| s.group_id() == *group)
            .cloned()
            .collect();
        students.sort_by(|a, b| a.full_name().cmp(b.full_name()));
        Ok(students)
    }

    async fn update_status(
        &self,
        student: &Student,
        entry: &HistoryEntry,
    ) -> Result<(), DomainError> {
        self.check_writable("Failed to update student status")?;
        let mut tables = self.lock();
        match tables.students.iter_mut().find(|s| s.id() == student.id()) {
            Some(stored) => *stored = student.clone(),
            None => {
                return Err(DomainError::new(
                    ErrorCode::StudentNotFound,
                    format!("Student not found: {}", student.id()),
                ))
            }
        }
        tables.history.push(entry.clone());
        Ok(())
    }

    async fn add_document(
        &self,
        document: &StudentDocument,
        entry: &HistoryEntry,
    ) -> Result<(), DomainError> {
        self.check_writable("Failed to save student document")?;
        let mut tables = self.lock();
        if !tables.students.iter().any(|s| s.id() == document.student_id()) {
            return Err(DomainError::new(
                ErrorCode::StudentNotFound,
                format!("Student not found: {}", document.student_id()),
            ));
        }
        tables.student_documents.push(document.clone());
        tables.history.push(entry.clone());
        Ok(())
    }

    async fn list_documents(
        &self,
        student: &StudentId,
    ) -> Result<Vec<StudentDocument>, DomainError> {
        let mut docs: Vec<StudentDocument> = self
            .lock()
            .student_documents
            .iter()
            .filter(|d| d.student_id() == *student)
            .cloned()
            .collect();
        docs.reverse();
        docs.sort_by(|a, b| b.uploaded_at().cmp(a.uploaded_at()));
        Ok(docs)
    }

    async fn list_history(&self, student: &StudentId) -> Result<Vec<HistoryEntry>, DomainError> {
        let mut entries: Vec<HistoryEntry> = self
            .lock()
            .history
            .iter()
            .filter(|e| e.student_id() == *student)
            .cloned()
            .collect();
        entries.reverse();
        entries.sort_by(|a, b| b.recorded_at().cmp(a.recorded_at()));
        Ok(entries)
    }
}
